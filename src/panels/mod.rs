mod practice_panel;
mod study_panel;
mod tutor_panel;

pub use practice_panel::PracticePanel;
pub use study_panel::{reference_file_name, StudyPanel};
pub use tutor_panel::TutorPanel;
