use crate::output::{print_json, print_table};
use serde::Serialize;
use todo_core::handler::{handler, StateOption};
use todo_core::state::allowed_targets;
use todo_core::types::CliState;

#[derive(Serialize)]
struct StateRow {
    state: CliState,
    title: &'static str,
    prompt: &'static str,
    transitions: &'static [CliState],
    options: &'static [StateOption],
}

pub fn run(json: bool) -> anyhow::Result<()> {
    let rows: Vec<StateRow> = CliState::all()
        .iter()
        .map(|&state| {
            let h = handler(state);
            StateRow {
                state,
                title: h.title,
                prompt: h.prompt,
                transitions: allowed_targets(state),
                options: h.options,
            }
        })
        .collect();

    if json {
        return print_json(&rows);
    }

    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let targets: Vec<&str> = row.transitions.iter().map(|s| s.as_str()).collect();
            let targets = if targets.is_empty() {
                "(terminal)".to_string()
            } else {
                targets.join(", ")
            };
            vec![row.state.to_string(), row.title.to_string(), targets]
        })
        .collect();
    print_table(&["STATE", "TITLE", "TRANSITIONS"], &table);

    for row in rows.iter().filter(|r| !r.options.is_empty()) {
        println!("\n{} ({})", row.title, row.state);
        println!("{}", handler(row.state).render_options());
    }
    Ok(())
}
