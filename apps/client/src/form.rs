//! Presentation state of the upload form and role filter.
//!
//! Controllers read from this (filter text, selected file, role selection);
//! the front end writes to it as the user picks files and types.

use crate::models::upload::CUSTOM_ROLE_SENTINEL;
use crate::models::{SelectedFile, UploadForm};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    selected: Option<SelectedFile>,
    pub name: String,
    pub email: String,
    role: String,
    pub custom_role: String,
    custom_role_visible: bool,
    custom_role_required: bool,
    pub job_desc: String,
    pub filter: String,
}

impl FormState {
    /// File picked through the chooser. Replaces any earlier selection.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.selected = Some(file);
    }

    /// Files dropped onto the upload area. Only the first is kept, and it replaces
    /// the current selection; an empty drop changes nothing.
    pub fn drop_files(&mut self, files: Vec<SelectedFile>) {
        if let Some(first) = files.into_iter().next() {
            self.selected = Some(first);
        }
    }

    /// Text of the selected-file label; empty when nothing is selected.
    pub fn selected_file_label(&self) -> &str {
        self.selected
            .as_ref()
            .map(|f| f.file_name.as_str())
            .unwrap_or("")
    }

    /// Changes the role select. `"custom"` reveals the free-text role and makes it required.
    pub fn select_role(&mut self, value: &str) {
        self.role = value.to_string();
        let custom = value == CUSTOM_ROLE_SENTINEL;
        self.custom_role_visible = custom;
        self.custom_role_required = custom;
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn custom_role_visible(&self) -> bool {
        self.custom_role_visible
    }

    pub fn custom_role_required(&self) -> bool {
        self.custom_role_required
    }

    /// Reports the first required field that is still blank.
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.selected.is_none() {
            return Some("resume");
        }
        let checks = [
            ("name", &self.name),
            ("email", &self.email),
            ("role", &self.role),
            ("job description", &self.job_desc),
        ];
        if let Some((label, _)) = checks.iter().find(|(_, v)| v.trim().is_empty()) {
            return Some(*label);
        }
        if self.custom_role_required && self.custom_role.trim().is_empty() {
            return Some("custom role");
        }
        None
    }

    /// Snapshot handed to the upload flow.
    pub fn snapshot(&self) -> UploadForm {
        UploadForm {
            resume: self.selected.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            custom_role: self.custom_role.clone(),
            job_desc: self.job_desc.clone(),
        }
    }

    /// Clears every upload field and the selected-file label. The role filter lives
    /// outside the upload form and is kept.
    pub fn reset(&mut self) {
        *self = FormState {
            filter: std::mem::take(&mut self.filter),
            ..FormState::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::new(name, name.as_bytes().to_vec())
    }

    #[test]
    fn test_pick_replaces_previous_selection() {
        let mut form = FormState::default();
        form.select_file(file("old.pdf"));
        form.select_file(file("new.pdf"));
        assert_eq!(form.selected_file_label(), "new.pdf");
    }

    #[test]
    fn test_drop_keeps_first_file_and_replaces() {
        let mut form = FormState::default();
        form.select_file(file("picked.pdf"));
        form.drop_files(vec![file("a.docx"), file("b.pdf")]);
        assert_eq!(form.selected_file_label(), "a.docx");

        form.drop_files(Vec::new());
        assert_eq!(form.selected_file_label(), "a.docx");
    }

    #[test]
    fn test_custom_role_toggles_visibility_and_requirement() {
        let mut form = FormState::default();
        form.select_role("custom");
        assert!(form.custom_role_visible());
        assert!(form.custom_role_required());

        form.select_role("Backend Engineer");
        assert!(!form.custom_role_visible());
        assert!(!form.custom_role_required());
    }

    #[test]
    fn test_missing_required_checks_custom_role_only_when_selected() {
        let mut form = FormState {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            job_desc: "python".into(),
            ..FormState::default()
        };
        assert_eq!(form.missing_required(), Some("resume"));

        form.select_file(file("cv.pdf"));
        form.select_role("custom");
        assert_eq!(form.missing_required(), Some("custom role"));

        form.custom_role = "Data Scientist".into();
        assert_eq!(form.missing_required(), None);
    }

    #[test]
    fn test_reset_clears_form_but_keeps_filter() {
        let mut form = FormState {
            name: "Ada".into(),
            filter: "eng".into(),
            ..FormState::default()
        };
        form.select_file(file("cv.pdf"));
        form.select_role("custom");

        form.reset();

        assert_eq!(form.selected_file_label(), "");
        assert_eq!(form.name, "");
        assert_eq!(form.role(), "");
        assert!(!form.custom_role_visible());
        assert_eq!(form.filter, "eng");
    }

    #[test]
    fn test_snapshot_carries_selection() {
        let mut form = FormState::default();
        form.select_file(file("cv.pdf"));
        form.select_role("custom");
        form.custom_role = "Data Scientist".into();

        let snapshot = form.snapshot();
        assert_eq!(snapshot.role, "custom");
        assert_eq!(snapshot.custom_role, "Data Scientist");
        assert_eq!(snapshot.resume.unwrap().file_name, "cv.pdf");
    }
}
