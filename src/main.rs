use clap::Parser;

use taskdeck::cli::{
    CategoryCommand, Cli, Command, ConfigCommand, PriorityCommand, ReminderCommand, TaskCommand,
};
use taskdeck::config::ConfigManager;
use taskdeck::logging;
use taskdeck::models::Task;
use taskdeck::planner::{Planner, TaskDraft};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ConfigManager::new(cli.config.as_deref())?;

    // Config commands run without touching the data files.
    let command = match cli.command {
        Command::Config(command) => return handle_config(command, &mut config),
        command => command,
    };

    let data_dir = config.data_dir();
    if let Err(err) = logging::init(logging::default_level(), &data_dir.join("logs")) {
        eprintln!("warning: {err}");
    }

    let storage = config.create_storage();
    let mut planner = Planner::load(&storage);

    match command {
        Command::Task(command) => handle_task(command, &mut planner, &config)?,
        Command::Category(command) => handle_category(command, &mut planner)?,
        Command::Priority(command) => handle_priority(command, &mut planner)?,
        Command::Reminder(command) => handle_reminder(command, &mut planner)?,
        Command::Summary => handle_summary(&planner),
        Command::Config(_) => unreachable!("handled above"),
    }

    planner.save(&storage)?;
    Ok(())
}

fn handle_task(
    command: TaskCommand,
    planner: &mut Planner,
    config: &ConfigManager,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        TaskCommand::Add {
            title,
            description,
            category,
            priority,
            deadline,
        } => {
            let draft = TaskDraft {
                title,
                description: description.unwrap_or_default(),
                category: category.or_else(|| config.default_category()),
                priority: priority.or_else(|| config.default_priority()),
                deadline,
            };
            let id = planner.add_task(draft)?;
            println!("Added task {id}");
        }
        TaskCommand::List => {
            for task in planner.tasks() {
                print_task(task);
            }
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            category,
            clear_category,
            priority,
            deadline,
            clear_deadline,
        } => {
            let current = planner
                .task(id)
                .ok_or(taskdeck::models::DomainError::TaskNotFound(id))?
                .clone();
            let draft = TaskDraft {
                title: title.unwrap_or(current.title),
                description: description.unwrap_or(current.description),
                category: if clear_category {
                    None
                } else {
                    category.or(current.category.map(|c| c.name))
                },
                priority: Some(priority.unwrap_or(current.priority)),
                deadline: if clear_deadline {
                    None
                } else {
                    deadline.or(current.deadline)
                },
            };
            planner.edit_task(id, draft)?;
            println!("Updated task {id}");
        }
        TaskCommand::Status { id, status } => {
            let dropped = planner.set_task_status(id, status.into())?;
            println!("Updated status of task {id}");
            if dropped > 0 {
                println!("Removed {dropped} reminder(s) of the completed task");
            }
        }
        TaskCommand::Delete { id } => {
            let dropped = planner.delete_task(id)?;
            println!("Deleted task {id} and {dropped} reminder(s)");
        }
    }
    Ok(())
}

fn handle_category(
    command: CategoryCommand,
    planner: &mut Planner,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        CategoryCommand::Add { name } => {
            planner.add_category(&name)?;
            println!("Added category '{name}'");
        }
        CategoryCommand::Rename { old_name, new_name } => {
            let touched = planner.rename_category(&old_name, &new_name)?;
            println!("Renamed category '{old_name}' to '{new_name}' ({touched} task(s) updated)");
        }
        CategoryCommand::Delete { name } => {
            let deleted = planner.delete_category(&name)?;
            println!(
                "Deleted category '{name}' along with {} task(s) and their reminders",
                deleted.len()
            );
        }
        CategoryCommand::List => {
            for category in planner.categories() {
                println!("{}", category.name);
            }
        }
    }
    Ok(())
}

fn handle_priority(
    command: PriorityCommand,
    planner: &mut Planner,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        PriorityCommand::Add { name } => {
            planner.add_priority(&name)?;
            println!("Added priority '{name}'");
        }
        PriorityCommand::Rename { old_name, new_name } => {
            let touched = planner.rename_priority(&old_name, &new_name)?;
            println!("Renamed priority '{old_name}' to '{new_name}' ({touched} task(s) updated)");
        }
        PriorityCommand::Delete { name } => {
            let reassigned = planner.delete_priority(&name)?;
            println!("Deleted priority '{name}' ({reassigned} task(s) moved to Default)");
        }
        PriorityCommand::List => {
            for priority in planner.priorities() {
                println!("{}", priority.name);
            }
        }
    }
    Ok(())
}

fn handle_reminder(
    command: ReminderCommand,
    planner: &mut Planner,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ReminderCommand::Add {
            task_id,
            date,
            description,
        } => {
            let id = planner.add_reminder(task_id, date, &description)?;
            println!("Added reminder {id} for task {task_id}");
        }
        ReminderCommand::Modify {
            task_id,
            old_date,
            new_date,
            description,
        } => {
            planner.modify_reminder(task_id, old_date, new_date, &description)?;
            println!("Updated reminder for task {task_id}");
        }
        ReminderCommand::Delete { id } => {
            planner.delete_reminder(id)?;
            println!("Deleted reminder {id}");
        }
        ReminderCommand::List { task_id } => match task_id {
            Some(task_id) => {
                for reminder in planner.reminders_for_task(task_id) {
                    print_reminder(reminder);
                }
            }
            None => {
                for reminder in planner.reminders() {
                    print_reminder(reminder);
                }
            }
        },
        ReminderCommand::Clean => {
            let dropped = planner.clean_expired_reminders();
            println!("Removed {dropped} expired reminder(s)");
        }
    }
    Ok(())
}

fn handle_summary(planner: &Planner) {
    let summary = planner.summary();
    println!("Total tasks:   {}", summary.total);
    println!("Completed:     {}", summary.completed);
    println!("Delayed:       {}", summary.delayed);
    println!("Due this week: {}", summary.upcoming);
}

fn handle_config(
    command: ConfigCommand,
    config: &mut ConfigManager,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ConfigCommand::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => println!("null"),
        },
        ConfigCommand::Set { key, value } => {
            config.set(&key, &value)?;
            println!("Set {key}");
        }
        ConfigCommand::Unset { key } => {
            config.unset(&key)?;
            println!("Unset {key}");
        }
        ConfigCommand::List => {
            for (key, value, is_default) in config.list() {
                let marker = if is_default { " (default)" } else { "" };
                println!("{key} = {value}{marker}");
            }
        }
    }
    Ok(())
}

fn print_task(task: &Task) {
    let category = task
        .category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");
    let deadline = task
        .deadline
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}  {:<11}  {}  [category: {category}, priority: {}, deadline: {deadline}]",
        task.id, task.status, task.title, task.priority
    );
}

fn print_reminder(reminder: &taskdeck::models::Reminder) {
    println!(
        "{}  {}  task {}  {}",
        reminder.id, reminder.reminder_date, reminder.task_id, reminder.description
    );
}
