//! Line-oriented control interface
//!
//! Each line read from stdin is one command, e.g. `down 100 100` or
//! `add cafe Corner Cafe`. Parsing turns it into a session `Msg`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::SharedMapTab;
use crate::session::Msg;

/// Usage lines printed by `help`
pub const COMMANDS: &[&str] = &[
    "down <x> <y> | move <x> <y> | up <x> <y> | leave",
    "resize <w> <h> | render",
    "add-mode | cancel | add <category> <name...> [| author | comment...] | close",
    "filter <category> | filter-all | filter-none | places",
    "share | open <url> | clear-region",
    "shared [--active|--inactive] [search...] | shared-toggle <id> | shared-delete <id>",
    "meetups | meetup-new <YYYY-MM-DD> <title...> [| a, b, ...]",
    "suggest <meetup> <name...> | vote <meetup> <place> <voter> | say <meetup> <author> <text...>",
    "help | quit",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{0}` is not a number")]
    BadNumber(String),
    #[error("`{0}` is not a date (expected YYYY-MM-DD)")]
    BadDate(String),
}

/// Parse one command line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<Msg>, ControlError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let msg = match command {
        "down" => {
            let (x, y) = pair("down", &rest)?;
            Msg::pointer_down(x, y)
        }
        "move" => {
            let (x, y) = pair("move", &rest)?;
            Msg::pointer_move(x, y)
        }
        "up" => {
            let (x, y) = pair("up", &rest)?;
            Msg::pointer_up(x, y)
        }
        "leave" => Msg::pointer_leave(),
        "resize" => {
            let (w, h) = pair("resize", &rest)?;
            Msg::resize(w, h)
        }
        "render" => Msg::render(),
        "add-mode" => Msg::start_adding(),
        "cancel" => Msg::cancel_adding(),
        "add" => match rest.split_first() {
            Some((category, words)) if !words.is_empty() => {
                let joined = words.join(" ");
                let mut fields = joined.splitn(3, '|').map(str::trim);
                let name = fields.next().unwrap_or_default();
                let author = fields.next().unwrap_or_default();
                let comment = fields.next().unwrap_or_default();
                Msg::submit_place(category, name, author, comment)
            }
            _ => {
                return Err(ControlError::MissingArgument {
                    command: "add",
                    expected: "a category and a name",
                });
            }
        },
        "filter" => match rest.first() {
            Some(id) => Msg::toggle_category(*id),
            None => {
                return Err(ControlError::MissingArgument {
                    command: "filter",
                    expected: "a category id",
                });
            }
        },
        "filter-all" => Msg::select_all_categories(),
        "filter-none" => Msg::deselect_all_categories(),
        "places" => Msg::list_places(),
        "close" => Msg::close_place(),
        "share" => Msg::share(),
        "open" => match rest.first() {
            Some(url) => Msg::open_link(*url),
            None => {
                return Err(ControlError::MissingArgument {
                    command: "open",
                    expected: "a share link",
                });
            }
        },
        "clear-region" => Msg::clear_region(),
        "shared" => {
            let (tab, search) = match rest.split_first() {
                Some((&"--active", search)) => (SharedMapTab::Active, search),
                Some((&"--inactive", search)) => (SharedMapTab::Inactive, search),
                _ => (SharedMapTab::All, rest.as_slice()),
            };
            Msg::shared_maps(search.join(" "), tab)
        }
        "shared-toggle" => Msg::toggle_shared_map(single("shared-toggle", &rest)?),
        "shared-delete" => Msg::delete_shared_map(single("shared-delete", &rest)?),
        "meetup-new" => match rest.split_first() {
            Some((date, words)) if !words.is_empty() => {
                let meeting_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|_| ControlError::BadDate(date.to_string()))?;
                let joined = words.join(" ");
                let (title, participants) = joined.split_once('|').unwrap_or((joined.as_str(), ""));
                Msg::create_meetup(meeting_date, title, participants)
            }
            _ => {
                return Err(ControlError::MissingArgument {
                    command: "meetup-new",
                    expected: "a date and a title",
                });
            }
        },
        "suggest" => match rest.split_first() {
            Some((meetup, name)) if !name.is_empty() => Msg::suggest(meetup, &name.join(" ")),
            _ => {
                return Err(ControlError::MissingArgument {
                    command: "suggest",
                    expected: "a meetup id and a place name",
                });
            }
        },
        "meetups" => Msg::meetups(),
        "vote" => match rest.as_slice() {
            [meetup, place, voter, ..] => Msg::vote(meetup, place, voter),
            _ => {
                return Err(ControlError::MissingArgument {
                    command: "vote",
                    expected: "a meetup id, a place id and a voter",
                });
            }
        },
        "say" => match rest.as_slice() {
            [meetup, author, text @ ..] if !text.is_empty() => {
                Msg::say(meetup, author, &text.join(" "))
            }
            _ => {
                return Err(ControlError::MissingArgument {
                    command: "say",
                    expected: "a meetup id, an author and some text",
                });
            }
        },
        "help" => Msg::Help,
        "quit" | "exit" => Msg::Quit,
        other => return Err(ControlError::Unknown(other.to_string())),
    };
    Ok(Some(msg))
}

fn single<'a>(command: &'static str, args: &[&'a str]) -> Result<&'a str, ControlError> {
    args.first().copied().ok_or(ControlError::MissingArgument {
        command,
        expected: "an id",
    })
}

fn pair(command: &'static str, args: &[&str]) -> Result<(f64, f64), ControlError> {
    match args {
        [a, b, ..] => Ok((number(a)?, number(b)?)),
        _ => Err(ControlError::MissingArgument {
            command,
            expected: "two numbers",
        }),
    }
}

fn number(raw: &str) -> Result<f64, ControlError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ControlError::BadNumber(raw.to_string()))
}
