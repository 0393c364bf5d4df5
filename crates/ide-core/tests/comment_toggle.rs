use ide_core::{
    Command, EditCommand, EditorKey, FileCommand, IdeConfig, IdeStateManager, Language,
    TextRange,
};
use pretty_assertions::assert_eq;

fn manager_with(language: Language, source: &str, selection: TextRange) -> IdeStateManager {
    let mut manager = IdeStateManager::new(IdeConfig::default());
    let file = manager.state().files().active_id().unwrap();
    manager
        .execute(Command::File(FileCommand::ChangeLanguage { file, language }))
        .unwrap();
    manager
        .execute(Command::Edit(EditCommand::ReplaceSource {
            text: source.to_string(),
            selection,
        }))
        .unwrap();
    manager
}

fn source(manager: &IdeStateManager) -> &str {
    &manager.state().active_file().unwrap().source
}

fn toggle(manager: &mut IdeStateManager) {
    manager
        .execute(Command::Key(EditorKey::ToggleComment))
        .unwrap();
}

#[test]
fn test_python_comment_round_trip() {
    let mut manager = manager_with(Language::Python, "  print(1)", TextRange::caret(4));

    toggle(&mut manager);
    assert_eq!(source(&manager), "  # print(1)");
    assert_eq!(manager.state().selection(), TextRange::caret(6));

    toggle(&mut manager);
    assert_eq!(source(&manager), "  print(1)");
    assert_eq!(manager.state().selection(), TextRange::caret(4));
}

#[test]
fn test_toggle_is_an_involution_per_language() {
    let line = "    value = compute(a, b)";
    for language in Language::ALL {
        let mut manager = manager_with(language, line, TextRange::caret(0));
        toggle(&mut manager);
        assert!(
            source(&manager)
                .trim_start()
                .starts_with(language.comment_marker())
        );
        toggle(&mut manager);
        assert_eq!(source(&manager), line, "{language}");
    }
}

#[test]
fn test_multi_line_selection_touches_only_covered_lines() {
    let text = "int a;\nint b;\nint c;\nint d;";
    // From inside line 1 to inside line 2.
    let mut manager = manager_with(Language::Cpp, text, TextRange::new(9, 16));

    toggle(&mut manager);
    assert_eq!(source(&manager), "int a;\n// int b;\n// int c;\nint d;");
    assert_eq!(manager.state().selection(), TextRange::new(15, 22));

    toggle(&mut manager);
    assert_eq!(source(&manager), text);
    assert_eq!(manager.state().selection(), TextRange::new(9, 16));
}

#[test]
fn test_mixed_lines_flip_individually() {
    let mut manager = manager_with(
        Language::JavaScript,
        "// a();\nb();",
        TextRange::new(0, 12),
    );
    toggle(&mut manager);
    assert_eq!(source(&manager), "a();\n// b();");
}

#[test]
fn test_uncomment_without_space_after_marker() {
    let mut manager = manager_with(Language::Python, "#x = 1\n\t#y", TextRange::new(0, 10));
    toggle(&mut manager);
    assert_eq!(source(&manager), "x = 1\n\ty");
}

#[test]
fn test_selection_moves_by_net_delta_and_clamps_at_zero() {
    let mut manager = manager_with(Language::Cpp, "a\nb", TextRange::new(0, 3));
    toggle(&mut manager);
    assert_eq!(source(&manager), "// a\n// b");
    assert_eq!(manager.state().selection(), TextRange::new(6, 9));

    let mut manager = manager_with(Language::Cpp, "a\n// b", TextRange::caret(2));
    toggle(&mut manager);
    assert_eq!(source(&manager), "a\nb");
    assert_eq!(manager.state().selection(), TextRange::caret(0));
}

#[test]
fn test_multibyte_text_uses_char_offsets() {
    let mut manager = manager_with(Language::Python, "é = 1\nñ = 2", TextRange::new(0, 7));
    toggle(&mut manager);
    assert_eq!(source(&manager), "# é = 1\n# ñ = 2");
    assert_eq!(manager.state().selection(), TextRange::new(4, 11));
}
