use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::model::board::{Board, Column, ThemeKind};
use crate::model::task::Task;
use crate::ops::board_ops::Action;
use crate::ops::form::TaskForm;
use crate::ops::store::BoardStore;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref())?;

    match cli.command {
        None => crate::tui::run(&data_dir),
        Some(cmd) => {
            let (mut store, _config) = BoardStore::open_dir(&data_dir)?;
            match cmd {
                // Read commands
                Commands::Show(args) => cmd_show(&store, args, json),
                Commands::Progress => cmd_progress(&store, json),

                // Task commands
                Commands::Add(args) => cmd_add(&mut store, args),
                Commands::Edit(args) => cmd_edit(&mut store, args),
                Commands::Mv(args) => cmd_mv(&mut store, args),
                Commands::Rm(args) => cmd_rm(&mut store, args),

                // Board commands
                Commands::Column(args) => cmd_column(&mut store, args),
                Commands::Theme(args) => cmd_theme(&mut store, args),
                Commands::Reset(args) => cmd_reset(&mut store, args),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Find a column by id, then by case-insensitive title
fn find_column<'a>(board: &'a Board, query: &str) -> Result<&'a Column, String> {
    if let Some(column) = board.column(query) {
        return Ok(column);
    }
    let query_lower = query.to_lowercase();
    let matches: Vec<&Column> = board
        .columns
        .iter()
        .filter(|c| c.title.to_lowercase() == query_lower)
        .collect();
    match matches.as_slice() {
        [column] => Ok(column),
        [] => Err(format!("column not found: {}", query)),
        _ => Err(format!(
            "column title '{}' is ambiguous, use the column ID",
            query
        )),
    }
}

fn find_task<'a>(board: &'a Board, id: &str) -> Result<&'a Task, String> {
    board.task(id).ok_or_else(|| format!("task not found: {}", id))
}

fn require_confirmation(yes: bool, what: &str) -> Result<(), String> {
    if yes {
        Ok(())
    } else {
        Err(format!("refusing to {} without --yes", what))
    }
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_show(store: &BoardStore, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board = store.board();
    let progress = store.progress();

    if let Some(query) = args.column {
        let column = find_column(board, &query)?;
        if json {
            let out = column_to_json(board, column, &progress);
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            for line in format_column(board, column, &progress) {
                println!("{}", line);
            }
        }
        return Ok(());
    }

    if json {
        let out = board_to_json(board, &progress);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_board(board, &progress) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_progress(store: &BoardStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board = store.board();
    let progress = store.progress();
    if json {
        let out = progress_to_json(board, &progress);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_progress(board, &progress) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Task command handlers
// ---------------------------------------------------------------------------

fn cmd_add(store: &mut BoardStore, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let column_id = find_column(store.board(), &args.column)?.id.clone();
    let form = TaskForm {
        title: args.title,
        description: args.description.unwrap_or_default(),
        due_date: args.due.unwrap_or_default(),
        tags: args.tags.unwrap_or_default(),
    };
    let fields = form.validate()?;
    let id = store.mutate(Action::AddTask { column_id, fields })?;
    if let Some(id) = id {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_edit(store: &mut BoardStore, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let task = find_task(store.board(), &args.id)?;
    let mut form = TaskForm::from_task(task);
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(due) = args.due {
        form.due_date = due;
    }
    if let Some(tags) = args.tags {
        form.tags = tags;
    }
    let fields = form.validate()?;
    store.mutate(Action::EditTask {
        task_id: args.id.clone(),
        fields,
    })?;
    println!("{} updated", args.id);
    Ok(())
}

fn cmd_mv(store: &mut BoardStore, args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let board = store.board();
    find_task(board, &args.id)?;
    let to = find_column(board, &args.column)?;
    let to_column_id = to.id.clone();
    let to_title = to.title.clone();
    let from_column_id = board
        .column_of_task(&args.id)
        .map(|c| c.id.clone())
        .unwrap_or_default();

    store.mutate(Action::MoveTask {
        task_id: args.id.clone(),
        from_column_id,
        to_column_id,
        index: args.index,
    })?;

    let completed = store
        .board()
        .task(&args.id)
        .is_some_and(|t| t.completed);
    let mark = if completed { " (completed)" } else { "" };
    println!("{} → {}{}", args.id, to_title, mark);
    Ok(())
}

fn cmd_rm(store: &mut BoardStore, args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    find_task(store.board(), &args.id)?;
    require_confirmation(args.yes, "delete a task")?;
    store.mutate(Action::DeleteTask {
        task_id: args.id.clone(),
    })?;
    println!("{} deleted", args.id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Board command handlers
// ---------------------------------------------------------------------------

fn cmd_column(store: &mut BoardStore, args: ColumnCmd) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        ColumnAction::Add(a) => {
            if let Some(id) = store.mutate(Action::AddColumn { title: a.title })? {
                println!("{}", id);
            }
        }
        ColumnAction::Rename(a) => {
            let column_id = find_column(store.board(), &a.column)?.id.clone();
            store.mutate(Action::RenameColumn {
                column_id: column_id.clone(),
                title: a.title,
            })?;
            let title = store
                .board()
                .column(&column_id)
                .map(|c| c.title.clone())
                .unwrap_or_default();
            println!("{} renamed to {}", column_id, title);
        }
        ColumnAction::Mv(a) => {
            let column_id = find_column(store.board(), &a.column)?.id.clone();
            store.mutate(Action::MoveColumn {
                column_id: column_id.clone(),
                index: Some(a.index),
            })?;
            let position = store.board().column_index(&column_id).unwrap_or(a.index);
            println!("{} moved to position {}", column_id, position);
        }
        ColumnAction::Rm(a) => {
            let column = find_column(store.board(), &a.column)?;
            let column_id = column.id.clone();
            let task_count = column.task_ids.len();
            require_confirmation(a.yes, "delete a column")?;
            store.mutate(Action::DeleteColumn {
                column_id: column_id.clone(),
            })?;
            println!("{} deleted ({} tasks)", column_id, task_count);
        }
    }
    Ok(())
}

fn cmd_theme(store: &mut BoardStore, args: ThemeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let action = match args.theme.as_deref() {
        None => Action::ToggleTheme,
        Some(s) => Action::SetTheme(
            ThemeKind::parse_theme(s)
                .ok_or_else(|| format!("unknown theme '{}' (expected: light, dark)", s))?,
        ),
    };
    store.mutate(action)?;
    println!("{}", store.board().theme);
    Ok(())
}

fn cmd_reset(store: &mut BoardStore, args: ConfirmArgs) -> Result<(), Box<dyn std::error::Error>> {
    require_confirmation(args.yes, "reset the board")?;
    store.mutate(Action::Reset)?;
    println!("board reset");
    Ok(())
}
