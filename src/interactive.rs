//! Line-oriented editor session driving an [`Editor`] from the terminal.

use std::io::{BufRead, Write};

use anyhow::Result;
use console::Style;
use tracing::debug;

use crate::document::{Direction, FieldPath, PersonalField, Section};
use crate::error::EditorError;
use crate::navigation::Navigator;
use crate::render::TemplateId;
use crate::storage::KeyValueStore;
use crate::ui;
use crate::wizard::{Editor, EditorStep, Stage, SubmissionRecord, Transition};

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Set { path: FieldPath, value: String },
    Add(Section),
    Remove(Section, usize),
    Move(Section, usize, Direction),
    Next,
    Previous,
    Go(Stage),
    Template(TemplateId),
    Show,
    Help,
    Quit,
}

const HELP: &str = "  set <field> <value>     e.g. set fullName Jane Doe, set experience[0].description line one\\nline two
  add <section>           append an empty entry (education, experience, skills, projects)
  rm <section> <n>        remove entry n (the last entry is kept)
  up|down <section> <n>   move entry n (not for skills)
  next | prev | go <stage>
  template <id>           modern, classic, creative, tech
  show | help | quit";

fn section_and_index<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<(Section, usize), String> {
    let section = args
        .next()
        .ok_or("missing section")?
        .parse::<Section>()
        .map_err(|e| e.to_string())?;
    let index = args
        .next()
        .ok_or("missing entry number")?
        .parse::<usize>()
        .map_err(|e| format!("invalid entry number: {e}"))?;
    Ok((section, index))
}

/// Parses one input line. `\n` inside a value becomes a line break.
pub fn parse_command(line: &str) -> Result<EditCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();
    let args = rest.split_whitespace();

    match word {
        "set" => {
            let (path, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if path.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            let path = path.parse::<FieldPath>().map_err(|e| e.to_string())?;
            Ok(EditCommand::Set {
                path,
                value: value.trim_start().replace("\\n", "\n"),
            })
        }
        "add" => {
            let section = rest.parse::<Section>().map_err(|e| e.to_string())?;
            Ok(EditCommand::Add(section))
        }
        "rm" | "remove" => {
            let (section, index) = section_and_index(args)?;
            Ok(EditCommand::Remove(section, index))
        }
        "up" | "down" => {
            let (section, index) = section_and_index(args)?;
            let direction = if word == "up" {
                Direction::Up
            } else {
                Direction::Down
            };
            Ok(EditCommand::Move(section, index, direction))
        }
        "next" | "n" => Ok(EditCommand::Next),
        "prev" | "p" => Ok(EditCommand::Previous),
        "go" => Ok(EditCommand::Go(rest.parse()?)),
        "template" => {
            let template = rest.parse::<TemplateId>().map_err(|e| e.to_string())?;
            Ok(EditCommand::Template(template))
        }
        "show" | "" => Ok(EditCommand::Show),
        "help" | "?" => Ok(EditCommand::Help),
        "quit" | "q" | "exit" => Ok(EditCommand::Quit),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}

fn show<S: KeyValueStore, N: Navigator>(editor: &Editor<'_, S, N>) {
    let wizard = editor.wizard();
    let stage = wizard.stage();
    let document = wizard.document();
    let bold = Style::new().bold();
    let dim = Style::new().dim();
    let red = Style::new().red();

    let steps: Vec<String> = Stage::ALL
        .iter()
        .map(|s| {
            if *s == stage {
                format!("[{s}]")
            } else {
                s.to_string()
            }
        })
        .collect();
    println!("{}", dim.apply_to(steps.join(" → ")));
    println!(
        "{}  {}",
        bold.apply_to(stage.title()),
        dim.apply_to(format!("template: {}", editor.template()))
    );

    let paths: Vec<FieldPath> = match stage.section() {
        None => PersonalField::ALL.into_iter().map(FieldPath::from).collect(),
        Some(section) => (0..document.section_len(section))
            .flat_map(|i| {
                section
                    .fields()
                    .iter()
                    .map(move |field| FieldPath::entry(section, i, *field))
            })
            .collect(),
    };
    for path in paths {
        let value = document.get(&path).unwrap_or_default();
        println!("  {:<28} {}", path.to_string(), value.replace('\n', "\\n"));
        if let Some(message) = wizard.errors().get(&path) {
            println!("  {:<28} {}", "", red.apply_to(message));
        }
    }
}

/// Runs the session until the resume is submitted (`Some`) or the user
/// quits (`None`). End of input counts as quitting.
pub fn run<S: KeyValueStore, N: Navigator>(
    editor: &mut Editor<'_, S, N>,
    input: &mut impl BufRead,
) -> Result<Option<SubmissionRecord>> {
    show(editor);
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input, leaving editor");
            return Ok(None);
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                ui::warning(&message);
                continue;
            }
        };

        match command {
            EditCommand::Set { path, value } => {
                if let Err(err) = editor.wizard_mut().set_field(&path, value) {
                    ui::warning(&err.to_string());
                }
            }
            EditCommand::Add(section) => {
                let index = editor.wizard_mut().append(section);
                ui::success(&format!("added {section}[{index}]"));
            }
            EditCommand::Remove(section, index) => {
                if !editor.wizard_mut().remove(section, index) {
                    ui::warning(&format!("{section}[{index}] was not removed"));
                }
            }
            EditCommand::Move(section, index, direction) => {
                match editor.wizard_mut().move_entry(section, index, direction) {
                    Ok(true) => {}
                    Ok(false) => ui::warning(&format!("{section}[{index}] cannot move further")),
                    Err(err) => ui::warning(&err.to_string()),
                }
            }
            EditCommand::Next => match editor.next() {
                Ok(EditorStep::Submitted(record)) => return Ok(Some(record)),
                Ok(EditorStep::Wizard(Transition::Blocked(errors))) => {
                    ui::print_validation(&errors);
                    continue;
                }
                Ok(EditorStep::Wizard(_)) => {}
                Err(err @ EditorError::Storage(_)) => {
                    ui::warning(&err.to_string());
                    continue;
                }
                Err(err) => return Err(err.into()),
            },
            EditCommand::Previous => {
                editor.previous();
            }
            EditCommand::Go(stage) => {
                editor.select(stage);
            }
            EditCommand::Template(template) => editor.set_template(template),
            EditCommand::Show => {}
            EditCommand::Help => {
                println!("{HELP}");
                continue;
            }
            EditCommand::Quit => return Ok(None),
        }
        show(editor);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::document::{EntryField, PersonalField};
    use crate::navigation::History;
    use crate::storage::{MemoryStore, ResumeRepository};
    use crate::wizard::EditorOptions;

    #[test]
    fn end_of_input_leaves_without_submitting() {
        let repo = ResumeRepository::new(MemoryStore::new());
        let mut history = History::new();
        let mut editor = Editor::open(&repo, &mut history, EditorOptions::default()).unwrap();

        let mut input = Cursor::new("set fullName Jane Doe\nnext\n");
        assert_eq!(run(&mut editor, &mut input).unwrap(), None);
        assert_eq!(editor.wizard().document().full_name, "Jane Doe");
        assert_eq!(editor.wizard().stage(), Stage::Personal);

        let mut empty = Cursor::new("");
        assert_eq!(run(&mut editor, &mut empty).unwrap(), None);
        drop(editor);
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn parses_set_with_spaces_and_line_breaks() {
        assert_eq!(
            parse_command("set fullName Jane  Doe").unwrap(),
            EditCommand::Set {
                path: PersonalField::FullName.into(),
                value: "Jane  Doe".to_string(),
            }
        );
        assert_eq!(
            parse_command(r"set experience[1].description • One\n• Two").unwrap(),
            EditCommand::Set {
                path: FieldPath::entry(Section::Experience, 1, EntryField::Description),
                value: "• One\n• Two".to_string(),
            }
        );
    }

    #[test]
    fn set_without_value_clears_the_field() {
        assert_eq!(
            parse_command("set phone").unwrap(),
            EditCommand::Set {
                path: PersonalField::Phone.into(),
                value: String::new(),
            }
        );
    }

    #[test]
    fn parses_list_commands() {
        assert_eq!(parse_command("add projects").unwrap(), EditCommand::Add(Section::Projects));
        assert_eq!(
            parse_command("rm education 2").unwrap(),
            EditCommand::Remove(Section::Education, 2)
        );
        assert_eq!(
            parse_command("up experience 1").unwrap(),
            EditCommand::Move(Section::Experience, 1, Direction::Up)
        );
        assert!(parse_command("rm education").is_err());
        assert!(parse_command("down hobbies 0").is_err());
    }

    #[test]
    fn parses_navigation() {
        assert_eq!(parse_command("next").unwrap(), EditCommand::Next);
        assert_eq!(parse_command(" prev ").unwrap(), EditCommand::Previous);
        assert_eq!(parse_command("go skills").unwrap(), EditCommand::Go(Stage::Skills));
        assert_eq!(
            parse_command("template tech").unwrap(),
            EditCommand::Template(TemplateId::Tech)
        );
        assert_eq!(parse_command("").unwrap(), EditCommand::Show);
        assert_eq!(parse_command("q").unwrap(), EditCommand::Quit);
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_command("dance").is_err());
        assert!(parse_command("set nope value").is_err());
        assert!(parse_command("go nowhere").is_err());
    }
}
