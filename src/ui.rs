use anyhow::{Result, anyhow};
use console::{Key, Term};
use dialoguer::Input;

#[derive(Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Back,
    Quit,
    Index(usize),
    /// Typed input that names no entry; the message says why.
    Invalid(String),
}

/// Lets the user pick one of `labels` by typing its number or by arrow
/// navigation. The first key decides which mode is used. Terminal errors
/// are returned; bad input comes back as `MenuChoice::Invalid`.
pub fn pick_story(prompt: &str, labels: &[String]) -> Result<MenuChoice> {
    let term = Term::stdout();
    println!("{}", prompt);
    println!("Type a number + Enter, or use arrow keys + Enter. 'b' = back, 'q' = quit.");

    match term.read_key()? {
        Key::ArrowUp | Key::ArrowDown | Key::Home | Key::End => arrow_select(prompt, labels),
        Key::Char('q') | Key::Char('Q') => Ok(MenuChoice::Quit),
        Key::Char('b') | Key::Char('B') | Key::Escape => Ok(MenuChoice::Back),
        Key::Char(c) if !c.is_control() => {
            let input: String = Input::new()
                .with_prompt("Selection")
                .allow_empty(true)
                .with_initial_text(c.to_string())
                .interact_text()?;
            Ok(selection_from_input(&input, labels.len()))
        }
        _ => {
            let input: String = Input::new()
                .with_prompt("Selection")
                .allow_empty(true)
                .interact_text()?;
            Ok(selection_from_input(&input, labels.len()))
        }
    }
}

pub fn selection_from_input(input: &str, len: usize) -> MenuChoice {
    parse_selection(input, len).unwrap_or_else(|err| MenuChoice::Invalid(err.to_string()))
}

/// Numbers are 1-based on screen.
pub fn parse_selection(input: &str, len: usize) -> Result<MenuChoice> {
    let s = input.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("b") {
        return Ok(MenuChoice::Back);
    }
    if s.eq_ignore_ascii_case("q") {
        return Ok(MenuChoice::Quit);
    }
    let idx: usize = s.parse().map_err(|_| anyhow!("invalid selection"))?;
    if idx == 0 || idx > len {
        return Err(anyhow!("out of range"));
    }
    Ok(MenuChoice::Index(idx - 1))
}

fn arrow_select(prompt: &str, labels: &[String]) -> Result<MenuChoice> {
    if labels.is_empty() {
        return Ok(MenuChoice::Back);
    }
    let term = Term::stdout();
    let mut sel: usize = 0;
    loop {
        term.clear_screen()?;
        println!("{}", prompt);
        for (i, label) in labels.iter().enumerate() {
            let marker = if i == sel { ">" } else { " " };
            println!("{} {}: {}", marker, i + 1, label);
        }
        println!("Use arrows + Enter. 'b' = back, 'q' = quit.");

        match term.read_key()? {
            Key::ArrowUp => sel = sel.saturating_sub(1),
            Key::ArrowDown => sel = (sel + 1).min(labels.len() - 1),
            Key::Home => sel = 0,
            Key::End => sel = labels.len() - 1,
            Key::Enter => return Ok(MenuChoice::Index(sel)),
            Key::Char('q') | Key::Char('Q') => return Ok(MenuChoice::Quit),
            Key::Char('b') | Key::Char('B') | Key::Escape => return Ok(MenuChoice::Back),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_one_based() {
        assert_eq!(parse_selection(" 3 ", 5).unwrap(), MenuChoice::Index(2));
    }

    #[test]
    fn letters_map_to_navigation() {
        assert_eq!(parse_selection("Q", 5).unwrap(), MenuChoice::Quit);
        assert_eq!(parse_selection("b", 5).unwrap(), MenuChoice::Back);
        assert_eq!(parse_selection("", 5).unwrap(), MenuChoice::Back);
    }

    #[test]
    fn bad_input_is_reported_not_raised() {
        assert_eq!(
            selection_from_input("two", 5),
            MenuChoice::Invalid("invalid selection".into())
        );
        assert_eq!(selection_from_input("9", 5), MenuChoice::Invalid("out of range".into()));
        assert_eq!(selection_from_input("1", 5), MenuChoice::Index(0));
    }

    #[test]
    fn out_of_range_and_garbage_are_errors() {
        assert!(parse_selection("0", 5).is_err());
        assert!(parse_selection("6", 5).is_err());
        assert!(parse_selection("two", 5).is_err());
    }
}
