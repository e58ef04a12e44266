//! Command grammar of the interactive prompt.

use chrono::NaiveDate;

use courtbook_core::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Courts,
    Book,
    Dates,
    Date(NaiveDate),
    Court(Option<Id>),
    Pick(Id),
    Selection,
    ClearSelection,
    Apply(Id),
    Cancel(Id),
    Status,
    Profile,
    Login,
    Register,
    Logout,
    Whoami,
    Quit,
}

pub const HELP: &str = "\
Commands:
  courts                list courts
  book                  booking grid for the selected date
  dates                 list selectable dates
  date YYYY-MM-DD       switch the booking date
  court <id>|all        narrow the grid to one court, or all
  pick <slot>           toggle a slot in the selection summary
  selection             show the selection summary
  clear                 clear the selection
  apply <slot>          apply for a slot
  cancel <application>  cancel a pending application
  status                my applications and reservation records
  profile               credit standing
  login, logout, register, whoami
  quit
";

/// Parses one input line. Blank lines parse to `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments for '{keyword}'"));
    }

    let no_arg = |command: Command| match arg {
        None => Ok(Some(command)),
        Some(_) => Err(format!("'{keyword}' takes no argument")),
    };

    match keyword {
        "help" | "?" => no_arg(Command::Help),
        "courts" => no_arg(Command::Courts),
        "book" => no_arg(Command::Book),
        "dates" => no_arg(Command::Dates),
        "selection" => no_arg(Command::Selection),
        "clear" => no_arg(Command::ClearSelection),
        "status" => no_arg(Command::Status),
        "profile" => no_arg(Command::Profile),
        "login" => no_arg(Command::Login),
        "register" => no_arg(Command::Register),
        "logout" => no_arg(Command::Logout),
        "whoami" => no_arg(Command::Whoami),
        "quit" | "exit" => no_arg(Command::Quit),
        "date" => {
            let value = arg.ok_or_else(|| "usage: date YYYY-MM-DD".to_string())?;
            let date: NaiveDate = value
                .parse()
                .map_err(|_| format!("'{value}' is not a date (expected YYYY-MM-DD)"))?;
            Ok(Some(Command::Date(date)))
        }
        "court" => {
            let value = arg.ok_or_else(|| "usage: court <id>|all".to_string())?;
            if value == "all" {
                return Ok(Some(Command::Court(None)));
            }
            let court_id = value
                .parse()
                .map_err(|_| format!("'{value}' is not a court id (usage: court <id>|all)"))?;
            Ok(Some(Command::Court(Some(court_id))))
        }
        "pick" => Ok(Some(Command::Pick(parse_id("pick <slot>", arg)?))),
        "apply" => Ok(Some(Command::Apply(parse_id("apply <slot>", arg)?))),
        "cancel" => Ok(Some(Command::Cancel(parse_id("cancel <application>", arg)?))),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

fn parse_id(usage: &str, arg: Option<&str>) -> Result<Id, String> {
    let value = arg.ok_or_else(|| format!("usage: {usage}"))?;
    value
        .parse()
        .map_err(|_| format!("'{value}' is not a numeric id (usage: {usage})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_parse_to_nothing() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn bare_commands_parse() {
        assert_eq!(parse("courts"), Ok(Some(Command::Courts)));
        assert_eq!(parse("  book  "), Ok(Some(Command::Book)));
        assert_eq!(parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(parse("?"), Ok(Some(Command::Help)));
    }

    #[test]
    fn arguments_are_parsed_and_validated() {
        assert_eq!(
            parse("date 2026-08-24"),
            Ok(Some(Command::Date("2026-08-24".parse().unwrap())))
        );
        assert_eq!(parse("apply 12"), Ok(Some(Command::Apply(12))));
        assert_eq!(parse("cancel 5"), Ok(Some(Command::Cancel(5))));
        assert_eq!(parse("court 2"), Ok(Some(Command::Court(Some(2)))));
        assert_eq!(parse("court all"), Ok(Some(Command::Court(None))));

        assert!(parse("date tomorrow").is_err());
        assert!(parse("apply twelve").is_err());
        assert!(parse("pick").is_err());
        assert!(parse("court").is_err());
        assert!(parse("court center").is_err());
    }

    #[test]
    fn arity_is_enforced() {
        assert!(parse("courts now").is_err());
        assert!(parse("apply 1 2").is_err());
    }

    #[test]
    fn unknown_commands_suggest_help() {
        let err = parse("teleport").unwrap_err();
        assert!(err.contains("teleport"));
        assert!(err.contains("help"));
    }
}
