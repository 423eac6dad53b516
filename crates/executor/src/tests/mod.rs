//! Test modules for the executor crate.

pub mod errors;

use serde_json::json;

use crate::{Command, Executor, IndexSpec};

/// Executor over a fresh store with a `players` soup.
pub(crate) fn players_executor() -> Executor {
    let executor = Executor::ephemeral();
    executor
        .execute(Command::RegisterSoup {
            soup_name: "players".into(),
            index_specs: vec![IndexSpec::string("name"), IndexSpec::integer("shots")],
        })
        .unwrap();
    executor
        .execute(Command::UpsertSoupEntries {
            soup_name: "players".into(),
            entries: vec![
                json!({"name": "Todd Stellanova", "shots": 37}),
                json!({"name": "Pro Bono Bonobo", "shots": 92}),
                json!({"name": "Robot", "shots": 0}),
            ],
            external_id_path: crate::SOUP_ENTRY_ID.into(),
        })
        .unwrap();
    executor
}
