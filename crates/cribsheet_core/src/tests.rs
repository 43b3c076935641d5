use std::collections::{BTreeMap, BTreeSet};

use cribsheet_cipher::{DigitGroup, Family, SubstitutionKey, arith, text};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::*;

fn atbash(plaintext: &str) -> String {
    plaintext
        .chars()
        .map(|c| match text::latin_index(c) {
            Some(i) => text::latin_letter(arith::atbash(i)),
            None => c,
        })
        .collect()
}

fn caesar(plaintext: &str, shift: i64) -> String {
    plaintext
        .chars()
        .map(|c| match text::latin_index(c) {
            Some(i) => text::latin_letter(arith::caesar_encrypt(i, shift)),
            None => c,
        })
        .collect()
}

/// Fills every unit of the puzzle with its solution.
fn solve(mut puzzle: Puzzle, config: &ScoringConfig) -> Puzzle {
    for domain in domains(&puzzle, config) {
        for unit in domain.units {
            if let Some(value) = solution(&puzzle, unit) {
                puzzle = puzzle.apply_answer(unit, &value);
            }
        }
    }
    puzzle
}

/// Returns the sets of units revealed together, in order.
fn reveal_sets(events: &[HintEvent]) -> Vec<BTreeSet<UnitId>> {
    events
        .iter()
        .filter_map(|event| match event {
            HintEvent::Revealed(units) => Some(units.iter().copied().collect()),
            _ => None,
        })
        .collect()
}

fn hint_until_exhausted(mut puzzle: Puzzle, seed: &str) -> (Puzzle, Vec<HintEvent>) {
    let config = ScoringConfig::default();
    let mut rng = hint_rng(seed);
    let mut events = vec![];
    loop {
        let (next, event) = puzzle.apply_hint(&mut rng, &config);
        puzzle = next;
        let done = event == HintEvent::Exhausted;
        events.push(event);
        if done || events.len() > 100 {
            return (puzzle, events);
        }
    }
}

#[test]
fn test_caesar_fully_correct() {
    let config = ScoringConfig::default();
    let puzzle = Puzzle::new(Cipher::Caesar { shift: Some(3) }, "HELLO", "KHOOR")
        .apply_answer(UnitId::Letter('K'), "h")
        .apply_answer(UnitId::Letter('H'), "E")
        .apply_answer(UnitId::Letter('O'), " l ")
        .apply_answer(UnitId::Letter('R'), "O");

    let grade = grade_puzzle(&puzzle, &config);
    assert_eq!(grade.total_inputs, 4);
    assert_eq!(grade.filled_inputs, 4);
    assert_eq!(grade.correct_inputs, 4);
    assert_eq!(grade.max_score, 5.7);
    assert_eq!(grade.score, grade.max_score);
    assert_eq!(grade.attempted_score, grade.max_score);
    assert!(is_solved(&puzzle, &config));
    assert_eq!(progress(&puzzle, &config), 100.0);
}

#[test]
fn test_partially_wrong_answer() {
    let config = ScoringConfig::default();
    let mut puzzle = Puzzle::new(Cipher::Atbash, "HELLO", "SVOOL")
        .apply_answer(UnitId::Letter('S'), "H")
        .apply_answer(UnitId::Letter('V'), "X");
    puzzle.points = Some(8.0);

    let grade = grade_puzzle(&puzzle, &config);
    assert_eq!((grade.total_inputs, grade.filled_inputs, grade.correct_inputs), (4, 2, 1));
    assert_eq!(grade.attempted_score, 4.0);
    assert_eq!(grade.score, 2.0);
    assert!(!is_solved(&puzzle, &config));
    assert_eq!(progress(&puzzle, &config), 50.0);
}

#[test]
fn test_keyed_alphabet_units() {
    let cipher = Cipher::Substitution {
        family: Family::Aristocrat,
        key: SubstitutionKey::K1 {
            keyword: "ZEBRA".to_owned(),
            shift: None,
        },
    };
    let pair = cipher.alphabet_pair().expect("keyword has letters");
    let plaintext = "THE QUICK BROWN FOX";
    let ciphertext: String = plaintext
        .chars()
        .map(|c| pair.encrypt(c).unwrap_or(c))
        .collect();
    let puzzle = Puzzle::new(cipher, plaintext, ciphertext.as_str());

    for (p, c) in plaintext.chars().zip(ciphertext.chars()).filter(|(p, _)| p.is_alphabetic()) {
        assert!(is_unit_correct(&puzzle, UnitId::Letter(c), &p.to_string()));
        let wrong = if p == 'A' { "B" } else { "A" };
        assert!(!is_unit_correct(&puzzle, UnitId::Letter(c), wrong));
    }

    let config = ScoringConfig::default();
    assert!(is_solved(&solve(puzzle, &config), &config));
}

#[test]
fn test_hill_2x2_blend() {
    let config = ScoringConfig::default();
    let cipher = Cipher::Hill2x2 {
        matrix: [[7, 8], [11, 11]],
        decryption: None,
    };
    let mut puzzle = Puzzle::new(cipher, "HELP", "XXXX");
    puzzle.points = Some(10.0);

    let cell = |row, col| UnitId::Cell { row, col };
    let puzzle = puzzle
        .apply_answer(cell(0, 0), "25")
        .apply_answer(cell(0, 1), "22")
        .apply_answer(cell(1, 0), "1")
        .apply_answer(cell(1, 1), "-3");
    let grade = grade_puzzle(&puzzle, &config);
    assert_eq!((grade.total_inputs, grade.filled_inputs, grade.correct_inputs), (8, 4, 4));
    assert_eq!(grade.score, 5.0);
    assert_eq!(grade.attempted_score, 5.0);

    let puzzle = puzzle
        .apply_answer(UnitId::Position(0), "H")
        .apply_answer(UnitId::Position(1), "E")
        .apply_answer(UnitId::Position(2), "X")
        .apply_answer(UnitId::Position(3), "X");
    let grade = grade_puzzle(&puzzle, &config);
    assert_eq!(grade.correct_inputs, 6);
    assert_eq!(grade.score, 7.5);
    assert_eq!(grade.attempted_score, 10.0);
    assert_eq!(progress(&puzzle, &config), 100.0);
}

#[test]
fn test_empty_puzzle() {
    let config = ScoringConfig::default();
    let puzzle = Puzzle::new(Cipher::Atbash, "", "");
    let grade = grade_puzzle(&puzzle, &config);
    assert_eq!(grade.total_inputs, 0);
    assert_eq!(grade.score, 0.0);
    assert_eq!(grade.attempted_score, 0.0);
    assert_eq!(progress(&puzzle, &config), 0.0);
    assert!(!is_solved(&puzzle, &config));
    assert_eq!(average_progress(&[], &config), 0.0);

    let (_, events) = hint_until_exhausted(puzzle, "empty");
    assert_eq!(events, [HintEvent::Exhausted]);
}

#[test]
fn test_hint_tiers() {
    let plaintext = "Every cloud has a silver lining";
    let cipher = Cipher::CompleteColumnar {
        key: "KEY".to_owned(),
    };
    let (puzzle, events) = hint_until_exhausted(Puzzle::new(cipher, plaintext, ""), "tiers");
    assert_eq!(events[0], HintEvent::Text("Crib: EVERY".to_owned()));
    assert_eq!(events[1], HintEvent::Text("Second Crib: CLOUD".to_owned()));
    assert!(matches!(events[2], HintEvent::Revealed(_)));
    assert_eq!(events.last(), Some(&HintEvent::Exhausted));

    // One reveal per position.
    let letters = puzzle.plaintext_letters().len();
    assert_eq!(events.len(), 2 + letters + 1);
    assert_eq!(puzzle.hinted.len(), letters);
    assert_eq!(puzzle.hint_progress.requests as usize, events.len());
    assert!(is_solved(&puzzle, &ScoringConfig::default()));
}

#[test]
fn test_correct_units_are_not_revealed() {
    let puzzle = Puzzle::new(Cipher::Atbash, "HELLO", "SVOOL").apply_answer(UnitId::Letter('S'), "H");
    let (puzzle, events) = hint_until_exhausted(puzzle, "correct");
    assert_eq!(events[0], HintEvent::Text("Crib: HELLO".to_owned()));
    assert_eq!(events.len(), 1 + 3 + 1);
    assert!(!puzzle.hinted.contains(&UnitId::Letter('S')));

    // Only the learner's own answer is graded.
    let grade = grade_puzzle(&puzzle, &ScoringConfig::default());
    assert_eq!((grade.total_inputs, grade.correct_inputs), (1, 1));
}

#[test]
fn test_baconian_group_reveal() {
    let cipher = Cipher::Baconian {
        binary_type: Some("A/B".to_owned()),
    };
    // A B A B C: groups 0/2 and 1/3 repeat.
    let ciphertext = "AAAAA AAAAB AAAAA AAAAB AAABA";
    let (puzzle, events) = hint_until_exhausted(Puzzle::new(cipher, "ABABC", ciphertext), "bacon");
    assert_eq!(events[0], HintEvent::Text("Binary Type: A/B".to_owned()));
    assert_eq!(events[1], HintEvent::Text("Crib: ABABC".to_owned()));

    let reveals = events
        .iter()
        .filter_map(|event| match event {
            HintEvent::Revealed(units) => Some(units.iter().copied().collect::<BTreeSet<_>>()),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(reveals.len(), 3);
    let p = UnitId::Position;
    let groups = [
        BTreeSet::from([p(0), p(2)]),
        BTreeSet::from([p(1), p(3)]),
        BTreeSet::from([p(4)]),
    ];
    for group in groups {
        assert!(reveals.contains(&group), "{group:?} not revealed together");
    }
    assert_eq!(puzzle.answer.get(p(3)), Some("B"));
}

#[test]
fn test_hinted_units_are_locked() {
    let config = ScoringConfig::default();
    let (puzzle, event) = Puzzle::new(Cipher::Atbash, "HI", "SR")
        .apply_hint(&mut hint_rng("x"), &config)
        .0
        .apply_hint(&mut hint_rng("x"), &config);
    let HintEvent::Revealed(units) = event else {
        panic!("expected a reveal, got {event:?}");
    };
    let unit = units[0];
    let value = puzzle.answer.get(unit).map(str::to_owned);
    assert_eq!(puzzle.apply_answer(unit, "Q").answer.get(unit), value.as_deref());
    assert_eq!(puzzle.clear_answer(unit).answer.get(unit), value.as_deref());

    let submitted = puzzle.submit();
    assert_eq!(submitted.apply_answer(UnitId::Letter('S'), "Q"), submitted);
}

#[test]
fn test_submission() {
    let config = ScoringConfig::default();
    let first = Puzzle::new(Cipher::Atbash, "HELLO", "SVOOL").apply_answer(UnitId::Letter('S'), "H");
    let mut second = Puzzle::new(Cipher::Caesar { shift: Some(1) }, "HELLO", "IFMMP");
    second.points = Some(6.0);
    second = second.apply_answer(UnitId::Letter('I'), "H");

    let submission = Submission {
        puzzles: vec![first, second],
        point_overrides: BTreeMap::from([(0, 4.0)]),
        hinted: BTreeMap::from([(1, BTreeSet::from([UnitId::Letter('F'), UnitId::Letter('M')]))]),
    };
    let grade = grade_submission(&submission, &config);
    assert_eq!(grade.puzzles.len(), 2);
    assert_eq!(grade.puzzles[0].max_score, 4.0);
    assert_eq!(grade.puzzles[0].score, 1.0);
    assert_eq!(grade.puzzles[1].total_inputs, 2);
    assert_eq!(grade.puzzles[1].max_score, 6.0);
    assert_eq!(grade.puzzles[1].score, 3.0);
    assert_eq!(grade.max_score, 10.0);
    assert_eq!(grade.score, 4.0);

    assert_eq!(average_progress(&submission.puzzles, &config), 25.0);
}

#[test]
fn test_puzzle_json() {
    let config = ScoringConfig::default();
    let puzzle = Puzzle::new(Cipher::Atbash, "HELLO", "SVOOL")
        .apply_answer(UnitId::Letter('V'), "E")
        .apply_hint(&mut hint_rng("json"), &config)
        .0;
    let json = serde_json::to_string(&puzzle).expect("serialize");
    let parsed: Puzzle = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, puzzle);

    let minimal: Puzzle = serde_json::from_str(
        r#"{"cipher": {"kind": "caesar", "shift": 3}, "plaintext": "HI", "ciphertext": "KL", "answer": {"K": "h"}}"#,
    )
    .expect("deserialize");
    assert_eq!(minimal.answer.get(UnitId::Letter('K')), Some("h"));
    assert!(is_unit_correct(&minimal, UnitId::Letter('K'), "H"));
}

#[test]
fn test_emoji_baconian_group_reveal() {
    let cipher = Cipher::Baconian {
        binary_type: Some("emoji".to_owned()),
    };
    // '☹️' is U+2639 followed by the variation selector U+FE0F.
    let a = "\u{2639}\u{fe0f}😊😊😊😊";
    let b = "😊\u{2639}\u{fe0f}😊😊😊";
    let puzzle = Puzzle::new(cipher, "AAB", format!("{a} {a} {b}"));
    assert!(is_unit_correct(&puzzle, UnitId::Position(2), "B"));

    let (puzzle, events) = hint_until_exhausted(puzzle, "emoji");
    assert_eq!(events[0], HintEvent::Text("Binary Type: emoji".to_owned()));
    let p = UnitId::Position;
    let mut reveals = reveal_sets(&events);
    reveals.sort();
    assert_eq!(reveals, [BTreeSet::from([p(0), p(1)]), BTreeSet::from([p(2)])]);
    assert_eq!(puzzle.answer.get(p(1)), Some("A"));
    assert_eq!(puzzle.answer.get(p(2)), Some("B"));
}

#[test]
fn test_checkerboard_token_reveal() {
    let cipher = Cipher::Checkerboard {
        row_key: "RAIN".to_owned(),
        col_key: "SNOW".to_owned(),
        polybius_key: "WEATHER".to_owned(),
        uses_ij: false,
    };
    // Tokens RS AN RS: positions 0 and 2 share a token.
    let puzzle = Puzzle::new(cipher, "HIH", "RS AN RS");
    let (puzzle, events) = hint_until_exhausted(puzzle, "checkerboard");
    assert!(matches!(&events[0], HintEvent::Text(keys) if keys.starts_with("Row key: RAIN.")));
    assert_eq!(events.last(), Some(&HintEvent::Exhausted));

    let p = UnitId::Position;
    let mut reveals = reveal_sets(&events);
    reveals.sort();
    assert_eq!(reveals, [BTreeSet::from([p(0), p(2)]), BTreeSet::from([p(1)])]);
    assert_eq!(puzzle.answer.get(p(2)), Some("H"));
    assert_eq!(puzzle.hinted.len(), 3);
}

#[test]
fn test_cryptarithm_digit_reveal() {
    let cipher = Cipher::Cryptarithm {
        groups: vec![DigitGroup::new("SEE", "1 2 2"), DigitGroup::new("ME", "3 2")],
    };
    let puzzle = Puzzle::new(cipher, "", "");
    let (puzzle, events) = hint_until_exhausted(puzzle, "cryptarithm");
    // No cribs: every hint is a reveal.
    assert!(matches!(events[0], HintEvent::Revealed(_)));

    let p = UnitId::Position;
    let mut reveals = reveal_sets(&events);
    reveals.sort();
    assert_eq!(
        reveals,
        [
            BTreeSet::from([p(0)]),
            BTreeSet::from([p(1), p(2), p(4)]),
            BTreeSet::from([p(3)]),
        ],
    );
    assert_eq!(puzzle.answer.get(p(4)), Some("E"));
    assert_eq!(puzzle.answer.get(p(3)), Some("M"));
}

#[test]
fn test_extreme_key_material() {
    let config = ScoringConfig::default();
    let load = |cipher: &str, plaintext: &str, ciphertext: &str| -> Puzzle {
        let json = format!(r#"{{"cipher": {cipher}, "plaintext": "{plaintext}", "ciphertext": "{ciphertext}"}}"#);
        serde_json::from_str(&json).expect("deserialize")
    };

    // i64::MIN is 18 mod 26.
    let puzzle = load(r#"{"kind": "caesar", "shift": -9223372036854775808}"#, "AB", "ST");
    assert!(is_unit_correct(&puzzle, UnitId::Letter('S'), "A"));
    assert_eq!(solution(&puzzle, UnitId::Letter('T')), Some("B".to_owned()));
    assert!(is_solved(&solve(puzzle, &config), &config));

    // i64::MAX is 7 mod 26: A -> 18, B -> 25.
    let puzzle = load(
        r#"{"kind": "affine", "a": 9223372036854775807, "b": -9223372036854775808}"#,
        "AB",
        "SZ",
    );
    assert!(is_unit_correct(&puzzle, UnitId::Letter('Z'), "B"));
    assert!(is_solved(&solve(puzzle, &config), &config));

    // Congruent to [[7, 8], [11, 11]] mod 26.
    let puzzle = load(
        r#"{"kind": "hill_2x2", "matrix": [[2600000000000000007, -2599999999999999992], [7800000000000000011, -7799999999999999989]]}"#,
        "HELP",
        "XXXX",
    );
    assert_eq!(solution(&puzzle, UnitId::Cell { row: 0, col: 1 }), Some("22".to_owned()));
    assert!(is_unit_correct(&puzzle, UnitId::Cell { row: 1, col: 1 }, "-9223372036854775803"));
    let grade = grade_puzzle(&solve(puzzle, &config), &config);
    assert_eq!((grade.total_inputs, grade.correct_inputs), (8, 8));

    // Every entry is 4 mod 26, so the matrix is singular.
    let puzzle = load(
        r#"{"kind": "hill_2x2", "matrix": [[4000000000000000000, 4000000000000000000], [4000000000000000000, 4000000000000000000]]}"#,
        "HELP",
        "XXXX",
    );
    assert_eq!(solution(&puzzle, UnitId::Cell { row: 0, col: 0 }), None);
    assert_eq!(grade_puzzle(&puzzle, &config).correct_inputs, 0);
}

#[test]
fn test_long_puzzle_grading() {
    let config = ScoringConfig::default();
    let len = 100_000;
    let plaintext: String = "ETAOINSHRDLU".chars().cycle().take(len).collect();
    let mut puzzle = Puzzle::new(
        Cipher::CompleteColumnar {
            key: "KEY".to_owned(),
        },
        plaintext.as_str(),
        "",
    );
    // Every tenth position is wrong.
    puzzle.answer = plaintext
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let value = if i % 10 == 0 { 'Z' } else { c };
            (UnitId::Position(i), value.to_string())
        })
        .collect();

    let grade = grade_puzzle(&puzzle, &config);
    assert_eq!(grade.total_inputs, len);
    assert_eq!(grade.filled_inputs, len);
    assert_eq!(grade.correct_inputs, len - len / 10);
    assert_eq!(progress(&puzzle, &config), 100.0);
}

proptest! {
    #[test]
    fn proptest_caesar_unit_correctness(shift in 0..26_i64, p in 0..26_i64, other in 0..26_i64) {
        let plaintext = text::latin_letter(p).to_string();
        let ciphertext = caesar(&plaintext, shift);
        let c = ciphertext.chars().next().unwrap();
        let puzzle = Puzzle::new(Cipher::Caesar { shift: Some(shift) }, plaintext.as_str(), ciphertext.as_str());
        prop_assert!(is_unit_correct(&puzzle, UnitId::Letter(c), &plaintext));
        prop_assert!(is_unit_correct(&puzzle, UnitId::Letter(c), &plaintext.to_lowercase()));
        let other = text::latin_letter(other);
        prop_assert_eq!(is_unit_correct(&puzzle, UnitId::Letter(c), &other.to_string()), other.to_string() == plaintext);
    }

    #[test]
    fn proptest_atbash_is_symmetric(p in 0..26_i64, other in 0..26_i64) {
        let (p, c) = (text::latin_letter(p), text::latin_letter(arith::atbash(p)));
        let forward = Puzzle::new(Cipher::Atbash, p.to_string(), c.to_string());
        let backward = Puzzle::new(Cipher::Atbash, c.to_string(), p.to_string());
        prop_assert!(is_unit_correct(&forward, UnitId::Letter(c), &p.to_string()));
        prop_assert!(is_unit_correct(&backward, UnitId::Letter(p), &c.to_string()));

        let other = text::latin_letter(other).to_string();
        prop_assert_eq!(is_unit_correct(&forward, UnitId::Letter(c), &other), other == p.to_string());
        prop_assert_eq!(is_unit_correct(&backward, UnitId::Letter(p), &other), other == c.to_string());
    }

    #[test]
    fn proptest_score_is_correct_fraction(plaintext in "[A-Z]{1,30}", fills in prop::collection::vec(0..3_u8, 26)) {
        let config = ScoringConfig::default();
        let mut puzzle = Puzzle::new(Cipher::Atbash, plaintext.as_str(), atbash(&plaintext).as_str());
        let units = domains(&puzzle, &config).remove(0).units;
        let mut correct = 0;
        for (&unit, &fill) in units.iter().zip(&fills) {
            let Some(answer) = solution(&puzzle, unit) else { continue };
            match fill {
                1 => {
                    puzzle = puzzle.apply_answer(unit, &answer);
                    correct += 1;
                }
                2 => puzzle = puzzle.apply_answer(unit, if answer == "A" { "B" } else { "A" }),
                _ => (),
            }
        }

        let grade = grade_puzzle(&puzzle, &config);
        let expected = correct as f64 / units.len() as f64 * grade.max_score;
        prop_assert_eq!(grade.correct_inputs, correct);
        prop_assert!((grade.score - expected).abs() < 1e-9);
        prop_assert!(grade.score <= grade.attempted_score + 1e-9);
        prop_assert!(grade.attempted_score <= grade.max_score + 1e-9);

        // Fixing a wrong answer never lowers the score.
        let solved = grade_puzzle(&solve(puzzle, &config), &config);
        prop_assert!(solved.score + 1e-9 >= grade.score);
        prop_assert!((solved.score - solved.max_score).abs() < 1e-9);
    }

    #[test]
    fn proptest_hints_never_repeat(seed in "[a-z]{1,8}", hints in 0..12_usize) {
        let config = ScoringConfig::default();
        let plaintext = "PACK MY BOX WITH FIVE DOZEN LIQUOR JUGS";
        let mut puzzle = Puzzle::new(Cipher::Atbash, plaintext, atbash(plaintext).as_str());
        let total = domains(&puzzle, &config)[0].units.len();
        let mut rng = hint_rng(&seed);
        let mut revealed = BTreeSet::new();
        for _ in 0..hints {
            let (next, event) = puzzle.apply_hint(&mut rng, &config);
            puzzle = next;
            if let HintEvent::Revealed(units) = event {
                for unit in units {
                    prop_assert!(revealed.insert(unit), "{} revealed twice", unit);
                }
            }
        }
        prop_assert_eq!(&puzzle.hinted, &revealed);
        let grade = grade_puzzle(&puzzle, &config);
        prop_assert_eq!(grade.total_inputs, total - revealed.len());
        prop_assert_eq!(grade.filled_inputs, 0);
    }
}
