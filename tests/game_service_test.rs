//! Tests for the round lifecycle: setup, verify, scoring and badges.

mod common;

use common::{game_service, score_service, setup_seeded_db, user};
use pajelingo::{
    ArticleAnswer, ArticleSetup, ConjugationAnswer, ConjugationSetup, ContentStore, EXPLORER,
    GameErrorKind, GameKind, GameRules, GameService, Identity, LINGUISTIC_MASTERY, BILINGUAL,
    RoundData, VocabularyAnswer, VocabularySetup,
};

fn german_article_setup() -> ArticleSetup {
    ArticleSetup {
        language: "German".to_string(),
    }
}

fn sein_answer(word_id: i32, forms: [&str; 6]) -> ConjugationAnswer {
    ConjugationAnswer {
        word_id,
        tense: "Präsens".to_string(),
        conjugation_1: forms[0].to_string(),
        conjugation_2: forms[1].to_string(),
        conjugation_3: forms[2].to_string(),
        conjugation_4: forms[3].to_string(),
        conjugation_5: forms[4].to_string(),
        conjugation_6: forms[5].to_string(),
    }
}

#[test]
fn test_article_round_scores_and_awards_explorer() {
    let (_db, repo) = setup_seeded_db();
    let alice = Identity::User(*user(&repo, "alice").id());
    let service = game_service(&repo);

    let challenge = service
        .setup(service.article(), alice, &german_article_setup())
        .expect("Setup failed");
    assert_eq!(challenge.word, "Hund");
    assert!(challenge.tense.is_none());

    let answer = ArticleAnswer {
        word_id: challenge.id,
        answer: " der ".to_string(),
    };
    let outcome = service
        .verify(service.article(), alice, &answer)
        .expect("Verify failed");
    assert!(outcome.result);
    assert_eq!(outcome.correct_answer, "der Hund");
    assert_eq!(outcome.score, Some(1));
    assert_eq!(outcome.new_badges, vec![EXPLORER]);

    let replay = service
        .verify(service.article(), alice, &answer)
        .expect_err("Replay should be rejected");
    assert!(matches!(replay.kind(), GameErrorKind::Session(_)));
}

#[test]
fn test_wrong_article_consumes_ticket_without_score() {
    let (_db, repo) = setup_seeded_db();
    let alice_id = *user(&repo, "alice").id();
    let alice = Identity::User(alice_id);
    let service = game_service(&repo);

    let challenge = service
        .setup(service.article(), alice, &german_article_setup())
        .expect("Setup failed");
    let outcome = service
        .verify(
            service.article(),
            alice,
            &ArticleAnswer {
                word_id: challenge.id,
                answer: "Der".to_string(),
            },
        )
        .expect("Verify failed");

    assert!(!outcome.result);
    assert_eq!(outcome.score, None);
    assert!(outcome.new_badges.is_empty());
    assert!(repo
        .pending_round(GameKind::Article, alice_id)
        .expect("Query failed")
        .is_none());
    assert!(repo.scores_for_user(alice_id).expect("Query failed").is_empty());
}

#[test]
fn test_elided_article_answer_text() {
    let (_db, repo) = setup_seeded_db();
    let service = game_service(&repo);
    let challenge = service
        .setup(
            service.article(),
            Identity::Anonymous,
            &ArticleSetup {
                language: "French".to_string(),
            },
        )
        .expect("Setup failed");

    let outcome = service
        .verify(
            service.article(),
            Identity::Anonymous,
            &ArticleAnswer {
                word_id: challenge.id,
                answer: "l'".to_string(),
            },
        )
        .expect("Verify failed");
    assert!(outcome.result);
    assert_eq!(outcome.correct_answer, "l'arbre");
}

#[test]
fn test_article_setup_validation() {
    let (_db, repo) = setup_seeded_db();
    let service = game_service(&repo);

    let english = service
        .setup(
            service.article(),
            Identity::Anonymous,
            &ArticleSetup {
                language: "English".to_string(),
            },
        )
        .expect_err("English has no articles");
    assert!(matches!(english.kind(), GameErrorKind::Validation(_)));

    let unknown = service
        .setup(
            service.article(),
            Identity::Anonymous,
            &ArticleSetup {
                language: "Esperanto".to_string(),
            },
        )
        .expect_err("Unknown language");
    assert!(matches!(unknown.kind(), GameErrorKind::NotFound(_)));

    let empty = service
        .setup(
            service.article(),
            Identity::Anonymous,
            &ArticleSetup {
                language: "Klingon".to_string(),
            },
        )
        .expect_err("No nouns in Klingon");
    assert!(matches!(empty.kind(), GameErrorKind::NotFound(_)));
}

#[test]
fn test_blank_language_is_a_validation_error() {
    let (_db, repo) = setup_seeded_db();
    let alice_id = *user(&repo, "alice").id();
    let alice = Identity::User(alice_id);
    let service = game_service(&repo);

    for blank in ["", "  "] {
        let article = service
            .setup(
                service.article(),
                alice,
                &ArticleSetup {
                    language: blank.to_string(),
                },
            )
            .expect_err("Blank article language");
        assert!(matches!(article.kind(), GameErrorKind::Validation(_)));

        let conjugation = service
            .setup(
                service.conjugation(),
                alice,
                &ConjugationSetup {
                    language: blank.to_string(),
                },
            )
            .expect_err("Blank conjugation language");
        assert!(matches!(conjugation.kind(), GameErrorKind::Validation(_)));

        let vocabulary = service
            .setup(
                service.vocabulary(),
                alice,
                &VocabularySetup {
                    base_language: "English".to_string(),
                    target_language: blank.to_string(),
                },
            )
            .expect_err("Blank target language");
        assert!(matches!(vocabulary.kind(), GameErrorKind::Validation(_)));

        let both_blank = service
            .setup(
                service.vocabulary(),
                alice,
                &VocabularySetup {
                    base_language: blank.to_string(),
                    target_language: blank.to_string(),
                },
            )
            .expect_err("Blank languages");
        assert!(matches!(both_blank.kind(), GameErrorKind::Validation(_)));
    }

    for game in [GameKind::Article, GameKind::Conjugation, GameKind::Vocabulary] {
        assert!(repo
            .pending_round(game, alice_id)
            .expect("Query failed")
            .is_none());
    }
}

#[test]
fn test_verify_without_setup_is_rejected() {
    let (_db, repo) = setup_seeded_db();
    let alice = Identity::User(*user(&repo, "alice").id());
    let service = game_service(&repo);
    let german = repo.find_language("German").expect("Query failed").expect("German");
    let hund = repo
        .find_word_by_name(*german.id(), "Hund")
        .expect("Query failed")
        .expect("Hund");

    let err = service
        .verify(
            service.article(),
            alice,
            &ArticleAnswer {
                word_id: *hund.id(),
                answer: "der".to_string(),
            },
        )
        .expect_err("No pending round");
    assert!(matches!(err.kind(), GameErrorKind::Session(_)));
}

#[test]
fn test_unknown_word_leaves_ticket_in_place() {
    let (_db, repo) = setup_seeded_db();
    let alice_id = *user(&repo, "alice").id();
    let alice = Identity::User(alice_id);
    let service = game_service(&repo);
    let challenge = service
        .setup(service.article(), alice, &german_article_setup())
        .expect("Setup failed");

    let err = service
        .verify(
            service.article(),
            alice,
            &ArticleAnswer {
                word_id: 9_999,
                answer: "der".to_string(),
            },
        )
        .expect_err("Unknown word");
    assert!(matches!(err.kind(), GameErrorKind::NotFound(_)));
    assert_eq!(
        repo.pending_round(GameKind::Article, alice_id)
            .expect("Query failed"),
        Some(RoundData::Article {
            word_id: challenge.id
        })
    );
}

#[test]
fn test_conjugation_slot_miss_is_wrong() {
    let (_db, repo) = setup_seeded_db();
    let alice = Identity::User(*user(&repo, "alice").id());
    let service = game_service(&repo);
    let setup = ConjugationSetup {
        language: "German".to_string(),
    };

    let challenge = service
        .setup(service.conjugation(), alice, &setup)
        .expect("Setup failed");
    assert_eq!(challenge.word, "sein");
    assert_eq!(challenge.tense.as_deref(), Some("Präsens"));

    let outcome = service
        .verify(
            service.conjugation(),
            alice,
            &sein_answer(challenge.id, ["bin", "bist", "sind", "sind", "seid", "sind"]),
        )
        .expect("Verify failed");
    assert!(!outcome.result);
    assert_eq!(outcome.score, None);
    assert_eq!(
        outcome.correct_answer,
        "ich bin\ndu bist\ner/sie/es ist\nwir sind\nihr seid\nsie sind\n"
    );
}

#[test]
fn test_conjugation_correct_answer_scores() {
    let (_db, repo) = setup_seeded_db();
    let alice = Identity::User(*user(&repo, "alice").id());
    let service = game_service(&repo);
    let challenge = service
        .setup(
            service.conjugation(),
            alice,
            &ConjugationSetup {
                language: "German".to_string(),
            },
        )
        .expect("Setup failed");

    let outcome = service
        .verify(
            service.conjugation(),
            alice,
            &sein_answer(challenge.id, ["bin ", " bist", "ist", "sind", "seid", "sind"]),
        )
        .expect("Verify failed");
    assert!(outcome.result);
    assert_eq!(outcome.score, Some(1));
}

#[test]
fn test_conjugation_tense_mismatch_is_session_error() {
    let (_db, repo) = setup_seeded_db();
    let alice_id = *user(&repo, "alice").id();
    let alice = Identity::User(alice_id);
    let service = game_service(&repo);
    let challenge = service
        .setup(
            service.conjugation(),
            alice,
            &ConjugationSetup {
                language: "German".to_string(),
            },
        )
        .expect("Setup failed");

    // A different round for the same verb, issued behind the player's back.
    repo.issue_round(
        GameKind::Conjugation,
        alice_id,
        &RoundData::Conjugation {
            word_id: challenge.id,
            tense: "Präteritum".to_string(),
        },
    )
    .expect("Issue failed");

    let err = service
        .verify(
            service.conjugation(),
            alice,
            &sein_answer(challenge.id, ["bin", "bist", "ist", "sind", "seid", "sind"]),
        )
        .expect_err("Mismatched round");
    assert!(matches!(err.kind(), GameErrorKind::Session(_)));
    assert!(repo
        .pending_round(GameKind::Conjugation, alice_id)
        .expect("Query failed")
        .is_none());
}

#[test]
fn test_conjugation_of_non_verb_is_not_found() {
    let (_db, repo) = setup_seeded_db();
    let service = game_service(&repo);
    let german = repo.find_language("German").expect("Query failed").expect("German");
    let hund = repo
        .find_word_by_name(*german.id(), "Hund")
        .expect("Query failed")
        .expect("Hund");

    let err = service
        .verify(
            service.conjugation(),
            Identity::Anonymous,
            &sein_answer(*hund.id(), ["a", "b", "c", "d", "e", "f"]),
        )
        .expect_err("Hund is not a verb");
    assert!(matches!(err.kind(), GameErrorKind::NotFound(_)));
}

#[test]
fn test_vocabulary_answer_order_matters() {
    let (_db, repo) = setup_seeded_db();
    let alice = Identity::User(*user(&repo, "alice").id());
    let service = game_service(&repo);
    let setup = VocabularySetup {
        base_language: "English".to_string(),
        target_language: "Portuguese".to_string(),
    };

    let challenge = service
        .setup(service.vocabulary(), alice, &setup)
        .expect("Setup failed");
    assert_eq!(challenge.word, "grande");
    assert_eq!(challenge.base_language.as_deref(), Some("English"));

    let answer = |text: &str| VocabularyAnswer {
        word_id: challenge.id,
        base_language: "English".to_string(),
        answer: text.to_string(),
    };

    let wrong = service
        .verify(service.vocabulary(), alice, &answer("large, big"))
        .expect("Verify failed");
    assert!(!wrong.result);
    assert_eq!(wrong.correct_answer, "big, large");

    service
        .setup(service.vocabulary(), alice, &setup)
        .expect("Setup failed");
    let right = service
        .verify(service.vocabulary(), alice, &answer("big, large"))
        .expect("Verify failed");
    assert!(right.result);
    assert_eq!(right.score, Some(1));
}

#[test]
fn test_vocabulary_language_validation() {
    let (_db, repo) = setup_seeded_db();
    let service = game_service(&repo);

    let same = service
        .setup(
            service.vocabulary(),
            Identity::Anonymous,
            &VocabularySetup {
                base_language: "German".to_string(),
                target_language: "German".to_string(),
            },
        )
        .expect_err("Same languages");
    assert!(matches!(same.kind(), GameErrorKind::Validation(_)));

    let portuguese = repo
        .find_language("Portuguese")
        .expect("Query failed")
        .expect("Portuguese");
    let grande = repo
        .find_word_by_name(*portuguese.id(), "grande")
        .expect("Query failed")
        .expect("grande");
    let own_language = service
        .verify(
            service.vocabulary(),
            Identity::Anonymous,
            &VocabularyAnswer {
                word_id: *grande.id(),
                base_language: "Portuguese".to_string(),
                answer: "grande".to_string(),
            },
        )
        .expect_err("Base equals word language");
    assert!(matches!(own_language.kind(), GameErrorKind::Validation(_)));
}

#[test]
fn test_vocabulary_without_synonyms_is_never_correct() {
    let (_db, repo) = setup_seeded_db();
    let service = game_service(&repo);
    let french = repo.find_language("French").expect("Query failed").expect("French");
    let arbre = repo
        .find_word_by_name(*french.id(), "arbre")
        .expect("Query failed")
        .expect("arbre");

    let outcome = service
        .verify(
            service.vocabulary(),
            Identity::Anonymous,
            &VocabularyAnswer {
                word_id: *arbre.id(),
                base_language: "English".to_string(),
                answer: String::new(),
            },
        )
        .expect("Verify failed");
    assert!(!outcome.result);
    assert_eq!(outcome.correct_answer, "");
}

#[test]
fn test_anonymous_play_writes_nothing() {
    let (_db, repo) = setup_seeded_db();
    let alice_id = *user(&repo, "alice").id();
    let service = game_service(&repo);

    let challenge = service
        .setup(service.article(), Identity::Anonymous, &german_article_setup())
        .expect("Setup failed");
    let outcome = service
        .verify(
            service.article(),
            Identity::Anonymous,
            &ArticleAnswer {
                word_id: challenge.id,
                answer: "der".to_string(),
            },
        )
        .expect("Verify failed");

    assert!(outcome.result);
    assert_eq!(outcome.score, None);
    assert!(outcome.new_badges.is_empty());
    assert!(repo
        .pending_round(GameKind::Article, alice_id)
        .expect("Query failed")
        .is_none());
    let rankings = score_service(&repo)
        .rankings(Identity::Anonymous, None)
        .expect("Rankings failed");
    assert!(rankings.entries.is_empty());
}

#[test]
fn test_badges_are_awarded_once() {
    let (_db, repo) = setup_seeded_db();
    let alice_id = *user(&repo, "alice").id();
    let alice = Identity::User(alice_id);
    let service = GameService::new(
        repo.clone(),
        GameRules {
            mastery_threshold: 2,
            ..GameRules::default()
        },
    );

    let play_article = || {
        let challenge = service
            .setup(service.article(), alice, &german_article_setup())
            .expect("Setup failed");
        service
            .verify(
                service.article(),
                alice,
                &ArticleAnswer {
                    word_id: challenge.id,
                    answer: "der".to_string(),
                },
            )
            .expect("Verify failed")
    };

    assert_eq!(play_article().new_badges, vec![EXPLORER]);
    assert_eq!(play_article().new_badges, vec![LINGUISTIC_MASTERY]);
    assert!(play_article().new_badges.is_empty());
    assert!(service.update_badges(alice_id).expect("Update failed").is_empty());

    let french = service
        .setup(
            service.article(),
            alice,
            &ArticleSetup {
                language: "French".to_string(),
            },
        )
        .expect("Setup failed");
    let outcome = service
        .verify(
            service.article(),
            alice,
            &ArticleAnswer {
                word_id: french.id,
                answer: "l'".to_string(),
            },
        )
        .expect("Verify failed");
    assert_eq!(outcome.new_badges, vec![BILINGUAL]);

    let held = score_service(&repo).badges_for(alice_id).expect("List failed");
    assert_eq!(held, vec![EXPLORER, LINGUISTIC_MASTERY, BILINGUAL]);
}
