use nimlab::{
    nim::Nim,
    pipeline::{MetricsObserver, NimSumPlayer, RandomPlayer, TrainingConfig, TrainingPipeline},
    q_learning::{QLearningAgent, QLearningConfig},
};

fn agent(seed: u64) -> QLearningAgent {
    QLearningAgent::new(
        "q-learning",
        QLearningConfig {
            seed: Some(seed),
            ..QLearningConfig::default()
        },
    )
    .unwrap()
}

#[test]
fn training_against_random_accumulates_experience() {
    let mut agent = agent(1);
    let mut opponent = RandomPlayer::new("random").with_seed(2);
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 300,
        seed: Some(3),
    });

    let result = pipeline
        .run(&mut agent, &mut opponent, &Nim::from_rows(vec![1, 3, 5], None))
        .unwrap();

    assert_eq!(result.episodes, 300);
    assert_eq!(result.wins + result.losses, 300);
    assert!(result.wins > 0, "some games against random play are won");
    assert!(
        agent.table().states() > 10,
        "training should discover many states, found {}",
        agent.table().states()
    );
}

#[test]
fn training_against_the_optimal_player_completes() {
    let mut agent = agent(4);
    let mut opponent = NimSumPlayer::new("nim-sum").with_seed(5);
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 100,
        seed: Some(6),
    });

    let result = pipeline
        .run(&mut agent, &mut opponent, &Nim::from_rows(vec![1, 3, 5], None))
        .unwrap();

    assert_eq!(result.episodes, 100);
}

#[test]
fn training_reports_final_episode_statistics() {
    let mut agent = agent(7);
    let mut opponent = RandomPlayer::new("random").with_seed(8);
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 40,
        seed: Some(9),
    })
    .with_observer(Box::new(MetricsObserver::new()));

    let result = pipeline
        .run(&mut agent, &mut opponent, &Nim::from_rows(vec![1, 3], None))
        .unwrap();

    assert_eq!(result.wins + result.losses, 40);
    assert!(result.final_mse >= 0.0);
    // late episodes revisit known states, so the final episode rarely
    // discovers more than the whole state space of a two-heap game
    assert!(result.final_discovered <= 8);
}
