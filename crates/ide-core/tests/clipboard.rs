use ide_core::{
    Command, CommandResult, CopyTarget, FileCommand, IdeConfig, IdeStateManager, Language,
    MemoryClipboard, RunCommand,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn test_copy_code_raises_flag_until_ack_expires() {
    let mut manager = IdeStateManager::new(IdeConfig::default());
    let file = manager.state().files().active_id().unwrap();
    let target = CopyTarget::Code(file);
    let mut clipboard = MemoryClipboard::default();

    assert_eq!(
        manager.copy(target, &mut clipboard).unwrap(),
        CommandResult::Copied(target)
    );
    assert_eq!(clipboard.contents(), Some(Language::Cpp.template()));
    assert!(manager.state().is_copied(target));

    manager.tick(Duration::from_millis(1999));
    assert!(manager.state().is_copied(target));
    manager.tick(Duration::from_millis(1));
    assert!(!manager.state().is_copied(target));
}

#[test]
fn test_recopy_restarts_ack_timer() {
    let mut manager = IdeStateManager::new(IdeConfig::default());
    let file = manager.state().files().active_id().unwrap();
    let target = CopyTarget::Code(file);
    let mut clipboard = MemoryClipboard::default();

    manager.copy(target, &mut clipboard).unwrap();
    manager.tick(Duration::from_millis(1500));
    manager.copy(target, &mut clipboard).unwrap();
    manager.tick(Duration::from_millis(1500));
    assert!(manager.state().is_copied(target));
    manager.tick(Duration::from_millis(500));
    assert!(!manager.state().is_copied(target));
}

#[test]
fn test_flags_are_independent_per_target() {
    let mut manager = IdeStateManager::new(IdeConfig::default());
    let main = manager.state().files().active_id().unwrap();
    let case = manager
        .state()
        .active_file()
        .unwrap()
        .test_cases
        .iter()
        .next()
        .unwrap()
        .id;
    let mut clipboard = MemoryClipboard::default();

    manager
        .execute(Command::Run(RunCommand::Start { file: main }))
        .unwrap();
    manager.tick(Duration::from_millis(1500));

    let output = CopyTarget::Output(main, case);
    manager.copy(output, &mut clipboard).unwrap();
    assert_eq!(
        clipboard.contents(),
        Some("Hello, World!\nEnter your name: Hello, Alice!")
    );

    manager.tick(Duration::from_millis(1000));
    manager
        .copy(CopyTarget::Code(main), &mut clipboard)
        .unwrap();
    manager.tick(Duration::from_millis(1000));

    assert!(!manager.state().is_copied(output));
    assert!(manager.state().is_copied(CopyTarget::Code(main)));
}

#[test]
fn test_clipboard_failure_leaves_state_alone() {
    let mut manager = IdeStateManager::new(IdeConfig::default());
    let file = manager.state().files().active_id().unwrap();
    let mut clipboard = MemoryClipboard::failing();

    assert_eq!(
        manager
            .copy(CopyTarget::Code(file), &mut clipboard)
            .unwrap(),
        CommandResult::Unchanged
    );
    assert!(!manager.state().is_copied(CopyTarget::Code(file)));
    assert_eq!(manager.version(), 0);
    assert_eq!(manager.next_timer_deadline(), None);
}

#[test]
fn test_deleting_file_drops_its_flags() {
    let mut manager = IdeStateManager::new(IdeConfig::default());
    let main = manager.state().files().active_id().unwrap();
    manager.execute(Command::File(FileCommand::Create)).unwrap();
    let mut clipboard = MemoryClipboard::default();

    manager
        .copy(CopyTarget::Code(main), &mut clipboard)
        .unwrap();
    manager
        .execute(Command::File(FileCommand::Delete { file: main }))
        .unwrap();
    assert!(!manager.state().is_copied(CopyTarget::Code(main)));

    // The pending reset fires harmlessly.
    let version = manager.version();
    assert_eq!(
        manager.tick(Duration::from_millis(2000)),
        vec![CommandResult::Unchanged]
    );
    assert_eq!(manager.version(), version);
}
