use tracing::debug;

use super::stage::Stage;
use crate::document::{Direction, FieldPath, ResumeDocument, Section};
use crate::error::DocumentError;
use crate::validation::{ValidationErrors, validate_document, validate_stage};

/// The result of asking the wizard to move.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Moved to the given stage.
    Moved(Stage),
    /// Nothing to do (e.g. `previous` on the first stage).
    Stayed,
    /// The checked fields are invalid; the stage did not change.
    Blocked(ValidationErrors),
    /// `next` on the terminal stage with a fully valid document.
    Submit,
}

/// Five-stage wizard over an in-memory [`ResumeDocument`].
///
/// Forward navigation validates the current stage, backward navigation and
/// direct stage selection never do. All edits go through the wizard so the
/// document is never changed behind its back.
#[derive(Debug, Clone)]
pub struct Wizard {
    document: ResumeDocument,
    stage: Stage,
    history: Vec<Stage>,
    errors: ValidationErrors,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(ResumeDocument::seeded())
    }
}

impl Wizard {
    pub fn new(document: ResumeDocument) -> Self {
        Self {
            document,
            stage: Stage::Personal,
            history: Vec::new(),
            errors: ValidationErrors::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    /// Errors from the last blocked `next`, cleared by any successful move.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Every stage visited so far, current stage included.
    pub fn history(&self) -> Vec<Stage> {
        let mut visited = self.history.clone();
        visited.push(self.stage);
        visited
    }

    /// Validates the current stage and advances, or at the terminal stage
    /// validates the whole document and asks for submission.
    pub fn next(&mut self) -> Transition {
        let errors = match self.stage.next() {
            Some(_) => validate_stage(&self.document, self.stage),
            None => validate_document(&self.document),
        };

        let transition = if !errors.is_empty() {
            Transition::Blocked(errors)
        } else {
            match self.stage.next() {
                Some(next) => Transition::Moved(next),
                None => Transition::Submit,
            }
        };

        self.apply(&transition);
        transition
    }

    /// Steps back one stage without validation.
    pub fn previous(&mut self) -> Transition {
        let transition = match self.stage.previous() {
            Some(previous) => Transition::Moved(previous),
            None => Transition::Stayed,
        };
        self.apply(&transition);
        transition
    }

    /// Jumps straight to `stage` without validation.
    pub fn select(&mut self, stage: Stage) -> Transition {
        let transition = if stage == self.stage {
            Transition::Stayed
        } else {
            Transition::Moved(stage)
        };
        self.apply(&transition);
        transition
    }

    fn apply(&mut self, transition: &Transition) {
        match transition {
            Transition::Moved(stage) => {
                debug!(from = %self.stage, to = %stage, "wizard moved");
                self.history.push(self.stage);
                self.stage = *stage;
                self.errors = ValidationErrors::default();
            }
            Transition::Blocked(errors) => {
                debug!(stage = %self.stage, errors = errors.len(), "wizard blocked");
                self.errors = errors.clone();
            }
            Transition::Submit => {
                self.errors = ValidationErrors::default();
            }
            Transition::Stayed => {}
        }
    }

    /// Overwrites one field of the document.
    pub fn set_field(
        &mut self,
        path: &FieldPath,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.document.set(path, value)
    }

    pub fn append(&mut self, section: Section) -> usize {
        self.document.append(section)
    }

    pub fn remove(&mut self, section: Section, index: usize) -> bool {
        self.document.remove(section, index)
    }

    pub fn move_entry(
        &mut self,
        section: Section,
        index: usize,
        direction: Direction,
    ) -> Result<bool, DocumentError> {
        self.document.move_entry(section, index, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PersonalField;

    fn fill_valid(wizard: &mut Wizard) {
        for (path, value) in [
            ("fullName", "Jane Doe"),
            ("email", "jane@example.com"),
            ("education[0].school", "MIT"),
            ("experience[0].company", "Acme"),
            ("experience[0].position", "Engineer"),
            ("skills[0].skillList", "Rust, SQL"),
            ("projects[0].name", "Resume builder"),
        ] {
            wizard.set_field(&path.parse().unwrap(), value).unwrap();
        }
    }

    #[test]
    fn happy_path_walks_all_stages_then_submits() {
        let mut wizard = Wizard::default();
        fill_valid(&mut wizard);

        assert_eq!(wizard.next(), Transition::Moved(Stage::Education));
        assert_eq!(wizard.next(), Transition::Moved(Stage::Experience));
        assert_eq!(wizard.next(), Transition::Moved(Stage::Skills));
        assert_eq!(wizard.next(), Transition::Moved(Stage::Projects));
        assert_eq!(wizard.next(), Transition::Submit);
        assert_eq!(wizard.stage(), Stage::Projects);
        assert_eq!(wizard.history(), Stage::ALL);
    }

    #[test]
    fn short_name_blocks_next() {
        let mut wizard = Wizard::default();
        fill_valid(&mut wizard);
        wizard
            .set_field(&PersonalField::FullName.into(), "A")
            .unwrap();

        let t = wizard.next();
        let Transition::Blocked(errors) = t else {
            panic!("expected Blocked, got {t:?}");
        };
        assert!(errors.contains(&PersonalField::FullName.into()));
        assert_eq!(wizard.stage(), Stage::Personal);
        assert_eq!(wizard.errors(), &errors);
    }

    #[test]
    fn invalid_email_blocks_next() {
        let mut wizard = Wizard::default();
        fill_valid(&mut wizard);
        wizard
            .set_field(&PersonalField::Email.into(), "not-an-email")
            .unwrap();

        assert!(matches!(wizard.next(), Transition::Blocked(_)));
        assert!(wizard.errors().contains(&PersonalField::Email.into()));
        assert_eq!(wizard.stage(), Stage::Personal);
    }

    #[test]
    fn unvisited_stages_do_not_block_earlier_ones() {
        let mut wizard = Wizard::default();
        wizard
            .set_field(&PersonalField::FullName.into(), "Jane Doe")
            .unwrap();
        wizard
            .set_field(&PersonalField::Email.into(), "jane@example.com")
            .unwrap();

        // Education, experience, skills and projects are still empty.
        assert_eq!(wizard.next(), Transition::Moved(Stage::Education));
    }

    #[test]
    fn final_next_validates_every_stage() {
        let mut wizard = Wizard::default();
        fill_valid(&mut wizard);
        wizard.select(Stage::Projects);
        wizard
            .set_field(&PersonalField::Email.into(), "broken")
            .unwrap();

        let Transition::Blocked(errors) = wizard.next() else {
            panic!("expected Blocked");
        };
        assert!(errors.contains(&PersonalField::Email.into()));
        assert_eq!(errors.stages().into_iter().collect::<Vec<_>>(), vec![Stage::Personal]);
        assert_eq!(wizard.stage(), Stage::Projects);
    }

    #[test]
    fn previous_never_validates_and_stops_at_start() {
        let mut wizard = Wizard::default();
        assert_eq!(wizard.previous(), Transition::Stayed);

        wizard.select(Stage::Skills);
        assert_eq!(wizard.previous(), Transition::Moved(Stage::Experience));
        assert_eq!(wizard.stage(), Stage::Experience);
    }

    #[test]
    fn select_jumps_out_of_order() {
        let mut wizard = Wizard::default();
        assert_eq!(wizard.select(Stage::Projects), Transition::Moved(Stage::Projects));
        assert_eq!(wizard.select(Stage::Projects), Transition::Stayed);
        assert_eq!(wizard.select(Stage::Education), Transition::Moved(Stage::Education));
    }

    #[test]
    fn successful_move_clears_errors() {
        let mut wizard = Wizard::default();
        assert!(matches!(wizard.next(), Transition::Blocked(_)));
        assert!(!wizard.errors().is_empty());

        wizard.select(Stage::Skills);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn list_mutations_reach_the_document() {
        let mut wizard = Wizard::default();
        assert_eq!(wizard.append(Section::Experience), 1);
        wizard
            .set_field(&"experience[1].company".parse().unwrap(), "Globex")
            .unwrap();
        assert!(wizard.move_entry(Section::Experience, 1, Direction::Up).unwrap());
        assert_eq!(wizard.document().experience.get(0).unwrap().company, "Globex");

        assert!(wizard.remove(Section::Experience, 0));
        assert!(!wizard.remove(Section::Experience, 0));
        assert_eq!(wizard.document().experience.len(), 1);
    }
}
