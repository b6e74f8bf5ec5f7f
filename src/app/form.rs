//! The student form - one form serving both create and edit modes

use thiserror::Error;

use crate::models::{Student, StudentPayload};

/// What a submit will do
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Editing(u64),
}

/// Editable fields, in tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Age,
    Grade,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Age,
            FormField::Age => FormField::Grade,
            FormField::Grade => FormField::Name,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Name => FormField::Grade,
            FormField::Age => FormField::Name,
            FormField::Grade => FormField::Age,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Age => "Age",
            FormField::Grade => "Grade",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("age must be a positive whole number")]
    InvalidAge,
    #[error("grade is required")]
    MissingGrade,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub mode: FormMode,
    pub name: String,
    pub age: String,
    pub grade: String,
    pub active_field: FormField,
    /// Byte offset into the active field
    pub cursor_position: usize,
}

impl StudentForm {
    /// Fill from a row and bind its id
    pub fn load(&mut self, student: &Student) {
        let [_, name, age, grade] = student.cells();
        self.mode = FormMode::Editing(student.id);
        self.name = name;
        self.age = age;
        self.grade = grade;
        self.active_field = FormField::Name;
        self.cursor_position = self.name.len();
    }

    /// Empty every field and unbind the id
    pub fn clear(&mut self) {
        *self = StudentForm::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.age.is_empty() && self.grade.is_empty()
    }

    /// Trim, coerce and check the fields
    pub fn validate(&self) -> Result<StudentPayload, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let age = match self.age.trim().parse::<u32>() {
            Ok(age) if age > 0 => age,
            _ => return Err(ValidationError::InvalidAge),
        };
        let grade = self.grade.trim();
        if grade.is_empty() {
            return Err(ValidationError::MissingGrade);
        }

        Ok(StudentPayload {
            name: name.to_string(),
            age,
            grade: grade.to_string(),
        })
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Age => &self.age,
            FormField::Grade => &self.grade,
        }
    }

    fn active_input(&self) -> &str {
        self.field(self.active_field)
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.active_field {
            FormField::Name => &mut self.name,
            FormField::Age => &mut self.age,
            FormField::Grade => &mut self.grade,
        }
    }

    pub fn focus(&mut self, field: FormField) {
        self.active_field = field;
        self.cursor_position = self.active_input().len();
    }

    pub fn next_field(&mut self) {
        self.focus(self.active_field.next());
    }

    pub fn prev_field(&mut self) {
        self.focus(self.active_field.prev());
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.active_input();
        if self.cursor_position > 0 {
            self.cursor_position = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.active_input();
        if self.cursor_position < input.len() {
            self.cursor_position = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let input = self.active_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let input = self.active_input_mut();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(name: &str, age: &str, grade: &str) -> StudentForm {
        StudentForm {
            name: name.to_string(),
            age: age.to_string(),
            grade: grade.to_string(),
            ..StudentForm::default()
        }
    }

    #[test]
    fn test_validate_trims_and_coerces() {
        let payload = filled("  Cara ", " 16", " 10 ").validate().unwrap();
        assert_eq!(
            payload,
            StudentPayload { name: "Cara".into(), age: 16, grade: "10".into() }
        );
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        assert_eq!(filled("   ", "16", "10").validate(), Err(ValidationError::MissingName));
        assert_eq!(filled("Cara", "", "10").validate(), Err(ValidationError::InvalidAge));
        assert_eq!(filled("Cara", "0", "10").validate(), Err(ValidationError::InvalidAge));
        assert_eq!(filled("Cara", "abc", "10").validate(), Err(ValidationError::InvalidAge));
        assert_eq!(filled("Cara", "-3", "10").validate(), Err(ValidationError::InvalidAge));
        assert_eq!(filled("Cara", "16", " ").validate(), Err(ValidationError::MissingGrade));
    }

    #[test]
    fn test_load_binds_id() {
        let mut form = StudentForm::default();
        form.load(&Student { id: 42, name: "Alice".into(), age: 20, grade: "B".into() });
        assert_eq!(form.mode, FormMode::Editing(42));
        assert_eq!((form.name.as_str(), form.age.as_str(), form.grade.as_str()), ("Alice", "20", "B"));

        form.clear();
        assert_eq!(form.mode, FormMode::Create);
        assert!(form.is_empty());
    }

    #[test]
    fn test_editing_handles_multibyte_chars() {
        let mut form = StudentForm::default();
        for c in "Zoë".chars() {
            form.enter_char(c);
        }
        form.move_cursor_left();
        form.delete_char();
        assert_eq!(form.name, "Zë");
        form.move_cursor_right();
        form.enter_char('!');
        assert_eq!(form.name, "Zë!");
    }

    #[test]
    fn test_field_cycle() {
        let mut form = filled("Al", "9", "");
        form.next_field();
        assert_eq!(form.active_field, FormField::Age);
        assert_eq!(form.cursor_position, 1);
        form.prev_field();
        form.prev_field();
        assert_eq!(form.active_field, FormField::Grade);
    }
}
