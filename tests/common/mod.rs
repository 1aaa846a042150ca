//! Shared fixtures for integration tests.

#![allow(dead_code)]

use tempfile::NamedTempFile;

use pajelingo::{ContentPack, GameRepository, GameRules, GameService, ScoreService, User};

/// Small multilingual content pack.
///
/// German has exactly one noun with an article (`Hund`) and one verb
/// (`sein`), and Portuguese has exactly one word (`grande`), so draws in
/// those languages are deterministic.
pub const PACK: &str = r#"
[[languages]]
name = "German"
pronouns = ["ich", "du", "er/sie/es", "wir", "ihr", "sie"]
articles = ["der", "die", "das"]

[[languages]]
name = "English"
pronouns = ["I", "you", "he/she/it", "we", "you", "they"]

[[languages]]
name = "Portuguese"
pronouns = ["eu", "tu", "ele/ela", "nós", "vós", "eles/elas"]
articles = ["o", "a"]

[[languages]]
name = "French"
articles = ["le", "la", "l'"]

[[languages]]
name = "Klingon"

[[words]]
language = "German"
name = "Hund"
article = "der"
category = "animals"
synonyms = [{ language = "English", name = "dog" }]

[[words]]
language = "German"
name = "sein"
category = "verbs"
conjugations = [
    { tense = "Präsens", forms = ["bin", "bist", "ist", "sind", "seid", "sind"] },
]

[[words]]
language = "Portuguese"
name = "grande"
synonyms = [
    { language = "English", name = "big" },
    { language = "English", name = "large" },
]

[[words]]
language = "French"
name = "arbre"
article = "l'"

[[words]]
language = "English"
name = "dog"
category = "animals"

[[words]]
language = "English"
name = "big"

[[words]]
language = "English"
name = "large"
"#;

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
pub fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

/// Same as [`setup_test_db`] with [`PACK`] loaded.
pub fn setup_seeded_db() -> (NamedTempFile, GameRepository) {
    let (db, repo) = setup_test_db();
    ContentPack::from_toml(PACK)
        .expect("Pack parse failed")
        .load_into(&repo)
        .expect("Pack load failed");
    (db, repo)
}

pub fn game_service(repo: &GameRepository) -> GameService {
    GameService::new(repo.clone(), GameRules::default())
}

pub fn score_service(repo: &GameRepository) -> ScoreService {
    ScoreService::new(repo.clone(), 10)
}

pub fn user(repo: &GameRepository, name: &str) -> User {
    repo.create_user(name.to_string()).expect("Create user failed")
}
