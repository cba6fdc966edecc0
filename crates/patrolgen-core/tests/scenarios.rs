use patrolgen_core::{
    AssignmentSettings, NameTables, Outcome, Patrol, PatrolBuilder, Rank, Roster, Scout,
    MAX_ATTEMPTS,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn scout(first: &str, last: &str, age: u32, rank: Rank) -> Scout {
    Scout::new(first, None, last, age, rank)
}

fn run(roster: &[Scout], settings: &AssignmentSettings, tables: &NameTables, seed: u64) -> Outcome {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    PatrolBuilder::new(settings, tables)
        .build(roster, &mut rng)
        .expect("settings are valid")
}

#[test]
fn six_unranked_scouts_split_evenly_into_two_patrols() {
    let roster: Vec<Scout> = ["Abadeer", "Gerges", "Youakim", "Morgan", "Kozman", "Wasef"]
        .iter()
        .map(|last| scout("Sam", last, 12, Rank::Unranked))
        .collect();
    let settings = AssignmentSettings {
        patrol_count: 2,
        relation_allowed: true,
        max_age_difference: 0,
        target_rank: 0.0,
        rank_threshold: 0.0,
    };
    let tables = NameTables::default();

    for seed in 0..10 {
        let Outcome::Placed(placement) = run(&roster, &settings, &tables, seed) else {
            panic!("seed {seed}: unconstrained roster must place");
        };
        let sizes: Vec<usize> = placement.patrols.iter().map(Patrol::len).collect();
        assert_eq!(sizes, vec![3, 3]);
        assert_eq!(placement.attempts, 1);
    }
}

#[test]
fn brothers_in_a_single_patrol_exhaust_every_attempt() {
    let roster = vec![
        scout("Mark", "Mattar", 12, Rank::Scout),
        scout("Peter", "Mattar", 12, Rank::Scout),
    ];
    let settings = AssignmentSettings {
        patrol_count: 1,
        relation_allowed: false,
        max_age_difference: 2,
        target_rank: 1.0,
        rank_threshold: 1.0,
    };

    let outcome = run(&roster, &settings, &NameTables::default(), 11);
    match outcome {
        Outcome::Exhausted { attempts, stats } => {
            assert_eq!(attempts, MAX_ATTEMPTS);
            assert!(stats.stalled_steps <= MAX_ATTEMPTS * 2 * roster.len());
        }
        Outcome::Placed(_) => panic!("brothers cannot share the only patrol"),
    }
}

#[test]
fn brothers_are_fine_when_relation_is_allowed() {
    let roster = vec![
        scout("Mark", "Mattar", 12, Rank::Scout),
        scout("Peter", "Mattar", 12, Rank::Scout),
    ];
    let settings = AssignmentSettings {
        patrol_count: 1,
        relation_allowed: true,
        max_age_difference: 2,
        target_rank: 1.0,
        rank_threshold: 1.0,
    };

    let outcome = run(&roster, &settings, &NameTables::default(), 11);
    assert!(outcome.is_placed());
}

fn incompatible_pair() -> (Vec<Scout>, NameTables) {
    let roster = vec![
        scout("Kareem", "Gendy", 12, Rank::Scout),
        scout("Rafik", "Youakim", 12, Rank::Scout),
    ];
    let mut tables = NameTables::default();
    // Declared one way only; must hold both ways
    tables.add_incompatible("Rafik Youakim", "Kareem Gendy");
    (roster, tables)
}

#[test]
fn incompatible_pair_cannot_share_the_only_patrol() {
    let (roster, tables) = incompatible_pair();
    let settings = AssignmentSettings {
        patrol_count: 1,
        relation_allowed: false,
        max_age_difference: 2,
        target_rank: 1.0,
        rank_threshold: 1.0,
    };

    for seed in 0..5 {
        let outcome = run(&roster, &settings, &tables, seed);
        assert!(!outcome.is_placed(), "seed {seed}");
        assert_eq!(outcome.attempts(), MAX_ATTEMPTS);
    }
}

#[test]
fn incompatible_pair_lands_in_different_patrols() {
    let (roster, tables) = incompatible_pair();
    let settings = AssignmentSettings {
        patrol_count: 2,
        relation_allowed: false,
        max_age_difference: 2,
        target_rank: 1.0,
        rank_threshold: 1.0,
    };

    for seed in 0..20 {
        let Outcome::Placed(placement) = run(&roster, &settings, &tables, seed) else {
            panic!("seed {seed}: two patrols must hold the pair");
        };
        for patrol in &placement.patrols {
            assert_eq!(patrol.len(), 1, "seed {seed}");
        }
    }
}

#[test]
fn leaders_patrol_is_built_from_the_full_roster() {
    let mut tables = NameTables::default();
    tables.troop_leaders.insert("John Wasily".to_string());
    tables.troop_leaders.insert("Theodore Georgy".to_string());
    tables.inactive.insert("Mark Beniamin".to_string());

    let roster = Roster::from_scouts(
        vec![
            scout("John", "Wasily", 16, Rank::Life),
            scout("Theodore", "Georgy", 15, Rank::Star),
            scout("Mark", "Beniamin", 12, Rank::Scout),
            scout("Paul", "Hanna", 12, Rank::Scout),
            scout("Aaron", "Abdou", 13, Rank::Tenderfoot),
        ],
        &tables,
    );
    assert_eq!(roster.len(), 4);

    let settings = AssignmentSettings {
        patrol_count: 1,
        relation_allowed: false,
        max_age_difference: 5,
        target_rank: 3.0,
        rank_threshold: 3.0,
    };

    let Outcome::Placed(placement) = run(roster.scouts(), &settings, &tables, 5) else {
        panic!("loose settings must place");
    };
    let mut leaders = placement.leaders.member_names();
    leaders.sort();
    assert_eq!(leaders, vec!["John Wasily".to_string(), "Theodore Georgy".to_string()]);
    assert_eq!(placement.patrols[0].len(), 2);
}
