//! Unit tests for board state transitions.

use super::fixtures::{
    IN_PROGRESS, INCOMING, TO_DO, column, comment, comment_id, ids, order, sample_board, task,
    task_id,
};
use crate::board::{
    config::BoardConfig,
    domain::{BoardAction, BoardState, ColumnRemovalPolicy, Priority, Rejection, TaskPatch},
    services::{BoardReducer, reduce},
};
use eyre::{bail, ensure};
use rstest::{fixture, rstest};

#[fixture]
fn board() -> BoardState {
    sample_board()
}

fn move_task(from: &str, to: &str, id: &str, index: usize) -> BoardAction {
    BoardAction::MoveTaskAtIndex {
        from: column(from),
        to: column(to),
        task_id: task_id(id),
        index,
    }
}

#[rstest]
fn move_across_columns_rewrites_status(board: BoardState) -> eyre::Result<()> {
    let transition = reduce(board, move_task(INCOMING, TO_DO, "1", 0));

    ensure!(transition.is_applied());
    let tasks = transition.state().current_tasks();
    ensure!(ids(tasks, INCOMING) == ["2"]);
    ensure!(ids(tasks, TO_DO) == ["1", "3", "4"]);
    let Some((location, moved)) = transition.state().find_task(&task_id("1")) else {
        bail!("task 1 should still be on the board");
    };
    ensure!(location.column == column(TO_DO));
    ensure!(moved.status() == &column(TO_DO));
    Ok(())
}

#[rstest]
#[case(0, &["1", "3", "4"])]
#[case(1, &["3", "1", "4"])]
#[case(2, &["3", "4", "1"])]
#[case(99, &["3", "4", "1"])]
fn move_across_columns_inserts_before_index(
    board: BoardState,
    #[case] index: usize,
    #[case] expected: &[&str],
) {
    let transition = reduce(board, move_task(INCOMING, TO_DO, "1", index));

    assert!(transition.is_applied());
    assert_eq!(ids(transition.state().current_tasks(), TO_DO), expected);
}

#[rstest]
fn move_within_column_counts_index_after_removal(board: BoardState) -> eyre::Result<()> {
    let moved = reduce(board, move_task(INCOMING, INCOMING, "1", 1));

    ensure!(moved.is_applied());
    ensure!(ids(moved.state().current_tasks(), INCOMING) == ["2", "1"]);
    Ok(())
}

#[rstest]
#[case("1", 0)]
#[case("2", 1)]
#[case("2", 7)]
fn move_to_current_position_is_rejected(
    board: BoardState,
    #[case] id: &str,
    #[case] index: usize,
) -> eyre::Result<()> {
    let transition = reduce(board.clone(), move_task(INCOMING, INCOMING, id, index));

    let Some(Rejection::RedundantMove { task_id: rejected, .. }) = transition.rejection() else {
        bail!("expected a redundant move, got {:?}", transition.outcome());
    };
    ensure!(rejected.as_str() == id);
    ensure!(transition.state() == &board);
    Ok(())
}

#[rstest]
#[case(move_task("Missing", TO_DO, "1", 0), Rejection::UnknownColumn(column("Missing")))]
#[case(move_task(INCOMING, "Missing", "1", 0), Rejection::UnknownColumn(column("Missing")))]
#[case(
    move_task(TO_DO, INCOMING, "1", 0),
    Rejection::UnknownTask { column: column(TO_DO), task_id: task_id("1") }
)]
fn invalid_moves_leave_board_untouched(
    board: BoardState,
    #[case] action: BoardAction,
    #[case] expected: Rejection,
) {
    let transition = reduce(board.clone(), action);

    assert_eq!(transition.rejection(), Some(&expected));
    assert_eq!(transition.state(), &board);
}

#[rstest]
fn add_column_generates_sequential_names(board: BoardState) -> eyre::Result<()> {
    let first = reduce(board, BoardAction::AddColumn);
    let second = reduce(first.into_state(), BoardAction::AddColumn);

    ensure!(second.is_applied());
    let state = second.state();
    ensure!(order(state) == [INCOMING, TO_DO, IN_PROGRESS, "column-4", "column-5"]);
    ensure!(state.current_tasks().tasks(&column("column-4")) == Some(&[][..]));
    ensure!(state.current_tasks().tasks(&column("column-5")) == Some(&[][..]));
    Ok(())
}

#[rstest]
fn add_column_rejects_existing_generated_name(board: BoardState) {
    let renamed = reduce(
        board,
        BoardAction::RenameColumn {
            old_name: column(IN_PROGRESS),
            new_name: "column-4".to_owned(),
        },
    )
    .into_state();

    let transition = reduce(renamed.clone(), BoardAction::AddColumn);

    assert_eq!(
        transition.rejection(),
        Some(&Rejection::GeneratedColumnExists(column("column-4")))
    );
    assert_eq!(transition.state(), &renamed);
}

#[rstest]
fn add_column_uses_configured_prefix(board: BoardState) {
    let reducer = BoardReducer::new(BoardConfig {
        generated_column_prefix: "lane ".to_owned(),
        ..BoardConfig::default()
    });

    let transition = reducer.apply(board, BoardAction::AddColumn);

    assert_eq!(order(transition.state()).last(), Some(&"lane 4"));
}

#[rstest]
fn rename_cascades_into_tasks(board: BoardState) -> eyre::Result<()> {
    let transition = reduce(
        board,
        BoardAction::RenameColumn {
            old_name: column(INCOMING),
            new_name: "  Inbox ".to_owned(),
        },
    );

    ensure!(transition.is_applied());
    let state = transition.state();
    ensure!(order(state) == ["Inbox", TO_DO, IN_PROGRESS]);
    ensure!(!state.has_column(&column(INCOMING)));
    let inbox = state
        .current_tasks()
        .tasks(&column("Inbox"))
        .ok_or_else(|| eyre::eyre!("missing renamed column"))?;
    ensure!(inbox.len() == 2);
    ensure!(inbox.iter().all(|task| task.status() == &column("Inbox")));
    Ok(())
}

#[rstest]
#[case(TO_DO, Rejection::ColumnNameTaken(column(TO_DO)))]
#[case("   ", Rejection::EmptyColumnName)]
#[case(INCOMING, Rejection::UnchangedColumnName(column(INCOMING)))]
fn rename_rejections(board: BoardState, #[case] new_name: &str, #[case] expected: Rejection) {
    let transition = reduce(
        board.clone(),
        BoardAction::RenameColumn {
            old_name: column(INCOMING),
            new_name: new_name.to_owned(),
        },
    );

    assert_eq!(transition.rejection(), Some(&expected));
    assert_eq!(transition.state(), &board);
}

#[rstest]
fn rename_of_missing_column_is_rejected(board: BoardState) {
    let transition = reduce(
        board,
        BoardAction::RenameColumn {
            old_name: column("Backlog"),
            new_name: "Later".to_owned(),
        },
    );

    assert_eq!(
        transition.rejection(),
        Some(&Rejection::UnknownColumn(column("Backlog")))
    );
}

#[rstest]
fn remove_column_discards_its_tasks(board: BoardState) -> eyre::Result<()> {
    let transition = reduce(board, BoardAction::remove_column(column(TO_DO)));

    ensure!(transition.is_applied());
    let state = transition.state();
    ensure!(order(state) == [INCOMING, IN_PROGRESS]);
    ensure!(!state.has_column(&column(TO_DO)));
    ensure!(state.find_task(&task_id("3")).is_none());
    ensure!(state.find_task(&task_id("4")).is_none());
    ensure!(state.current_tasks().task_count() == 4);
    Ok(())
}

#[rstest]
fn remove_column_requiring_empty_rejects_populated_column(board: BoardState) {
    let transition = reduce(
        board.clone(),
        BoardAction::RemoveColumn {
            column_name: column(TO_DO),
            policy: ColumnRemovalPolicy::RequireEmpty,
        },
    );

    assert_eq!(
        transition.rejection(),
        Some(&Rejection::ColumnNotEmpty {
            column: column(TO_DO),
            task_count: 2,
        })
    );
    assert_eq!(transition.state(), &board);
}

#[rstest]
fn remove_column_requiring_empty_accepts_empty_column(board: BoardState) {
    let with_column = reduce(board, BoardAction::AddColumn).into_state();

    let transition = reduce(
        with_column,
        BoardAction::RemoveColumn {
            column_name: column("column-4"),
            policy: ColumnRemovalPolicy::RequireEmpty,
        },
    );

    assert!(transition.is_applied());
    assert_eq!(order(transition.state()), [INCOMING, TO_DO, IN_PROGRESS]);
}

#[rstest]
fn remove_column_reassigns_tasks(board: BoardState) -> eyre::Result<()> {
    let transition = reduce(
        board,
        BoardAction::RemoveColumn {
            column_name: column(TO_DO),
            policy: ColumnRemovalPolicy::ReassignTo(column(INCOMING)),
        },
    );

    ensure!(transition.is_applied());
    let state = transition.state();
    ensure!(ids(state.current_tasks(), INCOMING) == ["1", "2", "3", "4"]);
    ensure!(state.check_invariants().is_ok());
    Ok(())
}

#[rstest]
#[case(TO_DO)]
#[case("Nowhere")]
fn remove_column_rejects_invalid_reassignment(board: BoardState, #[case] target: &str) {
    let transition = reduce(
        board.clone(),
        BoardAction::RemoveColumn {
            column_name: column(TO_DO),
            policy: ColumnRemovalPolicy::ReassignTo(column(target)),
        },
    );

    assert_eq!(
        transition.rejection(),
        Some(&Rejection::InvalidReassignment {
            column: column(TO_DO),
            target: column(target),
        })
    );
    assert_eq!(transition.state(), &board);
}

#[rstest]
fn reorder_columns_replaces_order(board: BoardState) {
    let transition = reduce(
        board,
        BoardAction::ReorderColumns {
            column_order: vec![column(IN_PROGRESS), column(INCOMING), column(TO_DO)],
        },
    );

    assert!(transition.is_applied());
    assert_eq!(order(transition.state()), [IN_PROGRESS, INCOMING, TO_DO]);
}

#[rstest]
#[case(vec![column(INCOMING), column(TO_DO)])]
#[case(vec![column(INCOMING), column(TO_DO), column(TO_DO)])]
#[case(vec![column(INCOMING), column(TO_DO), column("Elsewhere")])]
fn reorder_columns_rejects_non_permutations(
    board: BoardState,
    #[case] column_order: Vec<crate::board::domain::ColumnName>,
) {
    let transition = reduce(board.clone(), BoardAction::ReorderColumns { column_order });

    assert_eq!(transition.rejection(), Some(&Rejection::InvalidColumnOrder));
    assert_eq!(transition.state(), &board);
}

#[rstest]
fn add_then_remove_task_restores_column(board: BoardState) -> eyre::Result<()> {
    let added = reduce(
        board.clone(),
        BoardAction::AddTask {
            column: column(TO_DO),
            task: task("7", "Write release notes", "", INCOMING),
        },
    );
    ensure!(added.is_applied());
    ensure!(ids(added.state().current_tasks(), TO_DO) == ["3", "4", "7"]);
    let Some((_, added_task)) = added.state().find_task(&task_id("7")) else {
        bail!("added task should be on the board");
    };
    ensure!(added_task.status() == &column(TO_DO));

    let removed = reduce(
        added.into_state(),
        BoardAction::RemoveTask {
            column: column(TO_DO),
            task_id: task_id("7"),
        },
    );

    ensure!(removed.is_applied());
    ensure!(removed.state().current_tasks() == board.current_tasks());
    Ok(())
}

#[rstest]
fn add_task_rejects_duplicate_id(board: BoardState) {
    let transition = reduce(
        board.clone(),
        BoardAction::AddTask {
            column: column(IN_PROGRESS),
            task: task("1", "Copy", "", IN_PROGRESS),
        },
    );

    assert_eq!(
        transition.rejection(),
        Some(&Rejection::DuplicateTaskId(task_id("1")))
    );
    assert_eq!(transition.state(), &board);
}

#[rstest]
fn add_task_clears_the_filtered_view(board: BoardState) {
    let searching = reduce(board, BoardAction::search("design")).into_state();

    let transition = reduce(
        searching,
        BoardAction::AddTask {
            column: column(INCOMING),
            task: task("7", "Unrelated", "", INCOMING),
        },
    );

    let state = transition.state();
    assert_eq!(state.search_term(), "design");
    assert_eq!(state.filtered_tasks(), state.current_tasks());
}

#[rstest]
fn remove_missing_task_is_rejected(board: BoardState) {
    let transition = reduce(
        board.clone(),
        BoardAction::RemoveTask {
            column: column(INCOMING),
            task_id: task_id("42"),
        },
    );

    assert_eq!(
        transition.rejection(),
        Some(&Rejection::UnknownTask {
            column: column(INCOMING),
            task_id: task_id("42"),
        })
    );
    assert_eq!(transition.state(), &board);
}

#[rstest]
fn edit_task_merges_only_given_fields(board: BoardState) -> eyre::Result<()> {
    let transition = reduce(
        board,
        BoardAction::EditTask {
            column: column(TO_DO),
            task: TaskPatch::new(task_id("4"))
                .with_title("Audit design tokens")
                .with_priority(Priority::High),
        },
    );

    ensure!(transition.is_applied());
    let Some((_, edited)) = transition.state().find_task(&task_id("4")) else {
        bail!("edited task should be on the board");
    };
    ensure!(edited.title() == "Audit design tokens");
    ensure!(edited.priority() == Priority::High);
    ensure!(edited.description() == "Review and update the design system components for consistency.");
    ensure!(edited.status() == &column(TO_DO));
    Ok(())
}

#[rstest]
fn edit_task_in_wrong_column_is_rejected(board: BoardState) {
    let transition = reduce(
        board.clone(),
        BoardAction::EditTask {
            column: column(INCOMING),
            task: TaskPatch::new(task_id("4")).with_title("Nope"),
        },
    );

    assert!(!transition.is_applied());
    assert_eq!(transition.state(), &board);
}

#[rstest]
#[case("")]
#[case("   ")]
fn edit_task_rejects_blank_title(board: BoardState, #[case] title: &str) {
    let transition = reduce(
        board.clone(),
        BoardAction::EditTask {
            column: column(TO_DO),
            task: TaskPatch::new(task_id("4")).with_title(title),
        },
    );

    assert_eq!(
        transition.rejection(),
        Some(&Rejection::EmptyTaskTitle(task_id("4")))
    );
    assert_eq!(transition.state(), &board);
}

#[rstest]
fn edit_task_sets_and_clears_image(board: BoardState) -> eyre::Result<()> {
    let with_image = reduce(
        board,
        BoardAction::EditTask {
            column: column(TO_DO),
            task: TaskPatch::new(task_id("3")).with_image("cover.png"),
        },
    );
    ensure!(with_image.is_applied());
    let Some((_, illustrated)) = with_image.state().find_task(&task_id("3")) else {
        bail!("task 3 should be on the board");
    };
    ensure!(illustrated.image() == Some("cover.png"));

    let cleared = reduce(
        with_image.into_state(),
        BoardAction::EditTask {
            column: column(TO_DO),
            task: TaskPatch::new(task_id("3")).without_image(),
        },
    );
    ensure!(cleared.is_applied());
    let Some((_, plain)) = cleared.state().find_task(&task_id("3")) else {
        bail!("task 3 should be on the board");
    };
    ensure!(plain.image().is_none());
    Ok(())
}

#[rstest]
fn comment_lifecycle(board: BoardState) -> eyre::Result<()> {
    let added = reduce(
        board,
        BoardAction::AddComment {
            column: column(INCOMING),
            task_id: task_id("1"),
            comment: comment("c9", "Second look"),
        },
    );
    ensure!(added.is_applied());

    let edited = reduce(
        added.into_state(),
        BoardAction::EditComment {
            column: column(INCOMING),
            task_id: task_id("1"),
            comment_id: comment_id("c1"),
            content: "Formatting fixed".to_owned(),
        },
    );
    ensure!(edited.is_applied());
    let Some((_, commented)) = edited.state().find_task(&task_id("1")) else {
        bail!("task 1 should be on the board");
    };
    let contents: Vec<&str> = commented.comments().iter().map(|c| c.content()).collect();
    ensure!(contents == ["Formatting fixed", "Second look"]);
    let original = comment("c1", "This task needs better formatting!");
    let Some(first) = commented.comment(&comment_id("c1")) else {
        bail!("comment c1 should remain");
    };
    ensure!(first.created_at() == original.created_at());
    ensure!(first.author() == original.author());

    let deleted = reduce(
        edited.into_state(),
        BoardAction::DeleteComment {
            column: column(INCOMING),
            task_id: task_id("1"),
            comment_id: comment_id("c1"),
        },
    );
    ensure!(deleted.is_applied());
    let Some((_, remaining)) = deleted.state().find_task(&task_id("1")) else {
        bail!("task 1 should be on the board");
    };
    ensure!(remaining.comments().len() == 1);
    Ok(())
}

#[rstest]
fn comment_rejections(board: BoardState) {
    let duplicate = reduce(
        board.clone(),
        BoardAction::AddComment {
            column: column(INCOMING),
            task_id: task_id("1"),
            comment: comment("c1", "again"),
        },
    );
    assert_eq!(
        duplicate.rejection(),
        Some(&Rejection::DuplicateCommentId {
            task_id: task_id("1"),
            comment_id: comment_id("c1"),
        })
    );

    let missing = reduce(
        board.clone(),
        BoardAction::DeleteComment {
            column: column(INCOMING),
            task_id: task_id("1"),
            comment_id: comment_id("c404"),
        },
    );
    assert_eq!(
        missing.rejection(),
        Some(&Rejection::UnknownComment {
            task_id: task_id("1"),
            comment_id: comment_id("c404"),
        })
    );
    assert_eq!(missing.state(), &board);
}

#[rstest]
fn search_keeps_every_column(board: BoardState) {
    let transition = reduce(board, BoardAction::search("NEED"));

    let state = transition.state();
    assert_eq!(state.search_term(), "NEED");
    let filtered = state.filtered_tasks();
    assert_eq!(ids(filtered, INCOMING), ["2"]);
    assert_eq!(ids(filtered, TO_DO), ["3"]);
    assert_eq!(ids(filtered, IN_PROGRESS), ["6"]);
}

#[rstest]
fn search_without_matches_keeps_empty_columns(board: BoardState) {
    let state = reduce(board, BoardAction::search("zebra")).into_state();

    assert_eq!(state.filtered_tasks().len(), 3);
    assert_eq!(state.filtered_tasks().task_count(), 0);
}

#[rstest]
fn blank_search_restores_current_tasks(board: BoardState) {
    let searching = reduce(board, BoardAction::search("design")).into_state();

    let cleared = reduce(searching, BoardAction::search("   ")).into_state();

    assert_eq!(cleared.search_term(), "");
    assert_eq!(cleared.filtered_tasks(), cleared.current_tasks());
}

#[rstest]
fn active_search_follows_mutations(board: BoardState) {
    let searching = reduce(board, BoardAction::search("need")).into_state();

    let state = reduce(searching, move_task(TO_DO, IN_PROGRESS, "3", 0)).into_state();

    assert_eq!(ids(state.filtered_tasks(), TO_DO), Vec::<&str>::new());
    assert_eq!(ids(state.filtered_tasks(), IN_PROGRESS), ["3", "6"]);
}

#[rstest]
fn search_covers_added_columns(board: BoardState) {
    let with_column = reduce(board, BoardAction::AddColumn).into_state();
    let moved = reduce(with_column, move_task(INCOMING, "column-4", "2", 0)).into_state();

    let state = reduce(moved, BoardAction::search("need")).into_state();

    assert_eq!(ids(state.filtered_tasks(), "column-4"), ["2"]);
    assert_eq!(ids(state.filtered_tasks(), INCOMING), Vec::<&str>::new());
}

#[rstest]
fn reset_restores_initial_snapshot(board: BoardState) {
    let actions = [
        BoardAction::AddColumn,
        move_task(INCOMING, TO_DO, "1", 0),
        BoardAction::RenameColumn {
            old_name: column(IN_PROGRESS),
            new_name: "Doing".to_owned(),
        },
        BoardAction::search("need"),
        BoardAction::remove_column(column(TO_DO)),
    ];
    let mutated = actions
        .into_iter()
        .fold(board.clone(), |state, action| reduce(state, action).into_state());
    assert_ne!(mutated, board);

    let reset = reduce(mutated, BoardAction::ResetTasks);

    assert!(reset.is_applied());
    assert_eq!(reset.state(), &board);
}

#[rstest]
#[case(BoardAction::AddColumn)]
#[case(move_task(INCOMING, TO_DO, "2", 1))]
#[case(move_task(IN_PROGRESS, IN_PROGRESS, "5", 1))]
#[case(BoardAction::RenameColumn { old_name: column(TO_DO), new_name: "Next".to_owned() })]
#[case(BoardAction::remove_column(column(INCOMING)))]
#[case(BoardAction::RemoveColumn {
    column_name: column(INCOMING),
    policy: ColumnRemovalPolicy::ReassignTo(column(IN_PROGRESS)),
})]
#[case(BoardAction::ReorderColumns {
    column_order: vec![column(TO_DO), column(IN_PROGRESS), column(INCOMING)],
})]
#[case(BoardAction::AddTask { column: column(TO_DO), task: task("8", "New", "", TO_DO) })]
#[case(BoardAction::RemoveTask { column: column(TO_DO), task_id: task_id("3") })]
#[case(BoardAction::search("check"))]
#[case(BoardAction::ResetTasks)]
fn invariants_hold_after_each_action(
    board: BoardState,
    #[case] action: BoardAction,
) -> eyre::Result<()> {
    let searching = reduce(board, BoardAction::search("need")).into_state();

    let transition = reduce(searching, action);

    transition.state().check_invariants()?;
    Ok(())
}
