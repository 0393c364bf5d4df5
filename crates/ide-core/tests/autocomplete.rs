use ide_core::{
    Command, CompletionCommand, EditCommand, EditorKey, FileCommand, IdeConfig, IdeStateManager,
    Language, TextRange, suggest,
};
use pretty_assertions::assert_eq;

fn manager_with(language: Language, source: &str, caret: usize) -> IdeStateManager {
    let mut manager = IdeStateManager::new(IdeConfig::default());
    let file = manager.state().files().active_id().unwrap();
    manager
        .execute(Command::File(FileCommand::ChangeLanguage { file, language }))
        .unwrap();
    manager
        .execute(Command::Edit(EditCommand::ReplaceSource {
            text: source.to_string(),
            selection: TextRange::caret(caret),
        }))
        .unwrap();
    manager
}

fn type_text(manager: &mut IdeStateManager, text: &str) {
    for c in text.chars() {
        manager
            .execute(Command::Edit(EditCommand::InsertText {
                text: c.to_string(),
            }))
            .unwrap();
    }
}

fn source(manager: &IdeStateManager) -> &str {
    &manager.state().active_file().unwrap().source
}

#[test]
fn test_cpp_prefix_cl_suggests_class() {
    let items = suggest(Language::Cpp, "cl", 2, 8);
    assert!(items.contains(&"class"));
    assert!(!items.contains(&"cl"));
    assert!(items.len() <= 8);
    assert!(items.iter().all(|k| k.to_lowercase().starts_with("cl")));
}

#[test]
fn test_suggestions_respect_limit_order_and_case() {
    for language in Language::ALL {
        for prefix in ["co", "in", "re", "fo", "wh", "el"] {
            let items = suggest(language, prefix, 2, 8);
            assert!(items.len() <= 8);
            let positions: Vec<_> = items
                .iter()
                .map(|item| language.keywords().iter().position(|k| k == item).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    assert_eq!(
        suggest(Language::JavaScript, "ADD", 2, 8),
        vec!["addEventListener"]
    );
    assert!(suggest(Language::Cpp, "c", 2, 8).is_empty());
    assert!(suggest(Language::Cpp, "int", 2, 8).is_empty());
    assert_eq!(suggest(Language::Cpp, "co", 2, 2), vec!["cout", "continue"]);
}

#[test]
fn test_typing_shows_popup_and_enter_accepts() {
    let mut manager = manager_with(Language::Cpp, "", 0);
    type_text(&mut manager, "c");
    assert!(!manager.state().completion().is_visible());

    type_text(&mut manager, "l");
    let completion = manager.state().completion();
    assert!(completion.is_visible());
    assert_eq!(completion.selected_item(), Some("class"));

    manager.execute(Command::Key(EditorKey::Enter)).unwrap();
    assert_eq!(source(&manager), "class");
    assert_eq!(manager.state().selection(), TextRange::caret(5));
    assert!(!manager.state().completion().is_visible());
}

#[test]
fn test_navigation_clamps_and_tab_accepts() {
    let mut manager = manager_with(Language::Cpp, "co x", 2);
    assert_eq!(
        manager.state().completion().items(),
        ["cout", "continue", "const"]
    );

    for _ in 0..5 {
        manager.execute(Command::Key(EditorKey::Down)).unwrap();
    }
    assert_eq!(manager.state().completion().selected_index(), 2);
    manager.execute(Command::Key(EditorKey::Up)).unwrap();
    for _ in 0..5 {
        manager.execute(Command::Key(EditorKey::Up)).unwrap();
    }
    assert_eq!(manager.state().completion().selected_index(), 0);
    manager.execute(Command::Key(EditorKey::Down)).unwrap();

    manager.execute(Command::Key(EditorKey::Tab)).unwrap();
    assert_eq!(source(&manager), "continue x");
    assert_eq!(manager.state().selection(), TextRange::caret(8));
}

#[test]
fn test_click_accepts_given_index_and_keeps_trailing_text() {
    let mut manager = manager_with(Language::Cpp, "int co = 1;", 6);
    manager
        .execute(Command::Completion(CompletionCommand::Accept { index: Some(2) }))
        .unwrap();
    assert_eq!(source(&manager), "int const = 1;");
    assert_eq!(manager.state().selection(), TextRange::caret(9));
}

#[test]
fn test_escape_hides_without_touching_text() {
    let mut manager = manager_with(Language::Python, "pr", 2);
    assert!(manager.state().completion().is_visible());

    manager.execute(Command::Key(EditorKey::Escape)).unwrap();
    assert!(!manager.state().completion().is_visible());
    assert_eq!(source(&manager), "pr");

    // With no popup, Tab indents instead.
    manager.execute(Command::Key(EditorKey::Tab)).unwrap();
    assert_eq!(source(&manager), "pr  ");
}

#[test]
fn test_whitespace_ends_the_token() {
    let mut manager = manager_with(Language::Python, "", 0);
    type_text(&mut manager, "de");
    assert!(manager.state().completion().is_visible());
    type_text(&mut manager, " ");
    assert!(!manager.state().completion().is_visible());
}

#[test]
fn test_enter_without_popup_auto_indents() {
    let mut manager = manager_with(Language::Cpp, "", 0);
    type_text(&mut manager, "int main() {");
    manager.execute(Command::Key(EditorKey::Enter)).unwrap();
    assert_eq!(source(&manager), "int main() {\n  ");

    type_text(&mut manager, "x;");
    manager.execute(Command::Key(EditorKey::Enter)).unwrap();
    assert_eq!(source(&manager), "int main() {\n  x;\n  ");
    assert_eq!(manager.state().selection(), TextRange::caret(20));
}

#[test]
fn test_switching_files_hides_popup() {
    let mut manager = manager_with(Language::Cpp, "cl", 2);
    assert!(manager.state().completion().is_visible());
    manager.execute(Command::File(FileCommand::Create)).unwrap();
    assert!(!manager.state().completion().is_visible());
    assert_eq!(manager.state().selection(), TextRange::caret(0));
}
