use crate::models::session::{Action, SearchType, Session, CATEGORIES};
use crate::utils::sort::SortKey;
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  search [all|title|author|subject] <text>   search the relay
  category <name>                            browse a category
  sort <title|author|date|rating>            reorder the current results
  open <n>                                   show details of result n
  close                                      close the detail view
  recent <n>                                 repeat recent search n
  max <n>                                    results per search (1-40)
  dismiss                                    hide the error message
  html <path>                                write the page as HTML
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Act(Action),
    WriteHtml(PathBuf),
    Help,
    Quit,
}

fn one_based(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a number from 1, got {:?}", raw.trim())),
    }
}

/// Maps one input line onto a command. Needs the session to resolve result numbers
/// and the currently selected search type.
pub fn parse_command(line: &str, session: &Session) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let action = match word.to_lowercase().as_str() {
        "search" | "s" => {
            let (search_type, text) = match rest.split_once(char::is_whitespace) {
                Some((first, text)) => match first.parse::<SearchType>() {
                    Ok(search_type) => (search_type, text),
                    Err(_) => (session.search_type, rest),
                },
                None => (session.search_type, rest),
            };
            Action::IssueSearch {
                text: text.to_string(),
                search_type,
            }
        }
        "category" | "c" => {
            let category = CATEGORIES
                .iter()
                .find(|c| c.eq_ignore_ascii_case(rest))
                .ok_or_else(|| format!("categories: {}", CATEGORIES.join(", ")))?;
            Action::IssueCategorySearch(category.to_string())
        }
        "sort" => Action::SelectSort(rest.parse::<SortKey>()?),
        "open" | "o" => {
            let index = one_based(rest)?;
            let id = session
                .book_id_at(index)
                .ok_or_else(|| format!("no result number {}", index + 1))?;
            Action::OpenDetail(id.to_string())
        }
        "close" => Action::CloseDetail,
        "recent" | "r" => Action::SelectRecent(one_based(rest)?),
        "max" => Action::SetMaxResults(
            rest.parse()
                .map_err(|_| format!("expected a number, got {:?}", rest))?,
        ),
        "dismiss" => Action::DismissError,
        "html" if !rest.is_empty() => return Ok(Command::WriteHtml(PathBuf::from(rest))),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        _ => return Err(format!("unknown command {:?}, try help", line)),
    };

    Ok(Command::Act(action))
}
