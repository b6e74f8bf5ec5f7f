use serde::{Deserialize, Serialize};

/// HTTP methods used against the roster API
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        }
    }

    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT)
    }
}

/// A student record as returned by the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    /// Shown as-is; the server does not constrain it
    pub age: i64,
    pub grade: String,
}

impl Student {
    /// Display cells for a table row: id, name, age, grade
    pub fn cells(&self) -> [String; 4] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.age.to_string(),
            self.grade.clone(),
        ]
    }
}

/// Body of create and update requests. The server owns ids, so none is sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub name: String,
    pub age: u32,
    pub grade: String,
}

/// The mutating operations the client can perform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update(u64),
    Delete(u64),
}

impl Mutation {
    pub fn method(&self) -> HttpMethod {
        match self {
            Mutation::Create => HttpMethod::POST,
            Mutation::Update(_) => HttpMethod::PUT,
            Mutation::Delete(_) => HttpMethod::DELETE,
        }
    }

    /// Alert text shown when the request cannot be delivered
    pub fn failure_message(&self) -> &'static str {
        use crate::constants::{MSG_DELETE_FAILED, MSG_SAVE_FAILED};
        match self {
            Mutation::Create | Mutation::Update(_) => MSG_SAVE_FAILED,
            Mutation::Delete(_) => MSG_DELETE_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_deserializes_from_list_json() {
        let json = r#"[{"id":1,"name":"Bob","age":15,"grade":"9"}]"#;
        let students: Vec<Student> = serde_json::from_str(json).unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].cells(), ["1", "Bob", "15", "9"].map(String::from));
    }

    #[test]
    fn test_student_accepts_any_integer_age() {
        let json = r#"{"id":2,"name":"Typo","age":-1,"grade":"9"}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.cells()[2], "-1");
    }

    #[test]
    fn test_payload_has_no_id() {
        let payload = StudentPayload {
            name: "Cara".to_string(),
            age: 16,
            grade: "10".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Cara", "age": 16, "grade": "10"}));
    }

    #[test]
    fn test_mutation_methods() {
        assert_eq!(Mutation::Create.method(), HttpMethod::POST);
        assert_eq!(Mutation::Update(3).method(), HttpMethod::PUT);
        assert_eq!(Mutation::Delete(3).method(), HttpMethod::DELETE);
        assert!(!HttpMethod::DELETE.has_body());
    }
}
