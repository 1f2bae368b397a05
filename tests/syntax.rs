extern crate depsampler;
extern crate rand;

use depsampler::lang::{tokens_from_pairs, Token};
use depsampler::syntax::graph::{self, arcs_from_heads};
use depsampler::syntax::scoring::{self, ScoreMatrix};
use depsampler::syntax::transition::{
    self, ArcStandard, ArcStandardActionType, State, TransitionState, TransitionSystem,
};
use depsampler::syntax::{self, Algorithm, Arc, ParseGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

static POSTAGS: &'static [&'static str] = &[
    "Noun",
    "Verb",
    "Determiner",
    "Adjective",
    "Adverb",
    "Preposition",
    "Pronoun",
    "Conjunction",
    "ProperNoun",
    "Value",
    "Interjection",
];

fn the_dog_barks() -> Vec<Token> {
    tokens_from_pairs(vec![("the", "Determiner"), ("dog", "Noun"), ("barks", "Verb")])
}

fn random_sentence<R: Rng>(rng: &mut R, len: usize) -> Vec<Token> {
    (0..len)
        .map(|i| {
            let pos = POSTAGS[rng.gen_range(0..POSTAGS.len())];
            Token::new(format!("w{}", i), pos, i)
        })
        .collect()
}

fn edge_pairs(graph: &ParseGraph) -> Vec<(&str, &str)> {
    graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect()
}

#[test]
fn test_affinity_fallbacks() {
    assert_eq!(scoring::affinity("Noun", "Determiner"), 0.9);
    assert_eq!(scoring::affinity("Noun", "Interjection"), 0.2);
    assert_eq!(scoring::affinity("Verb", "Noun"), 0.9);
    assert_eq!(scoring::affinity("Interjection", "Noun"), 0.5);
    assert_eq!(scoring::affinity("ROOT", "Verb"), 1.0);
}

#[test]
fn test_score_decay() {
    assert_eq!(scoring::score("Verb", "Noun", 0), 0.9);
    let s = scoring::score("Verb", "Noun", 5);
    assert!((s - 0.9 * (-1.0f64).exp()).abs() < 1e-12);
    assert!(scoring::score("Verb", "Noun", 1) > scoring::score("Verb", "Noun", 2));
}

#[test]
fn test_score_matrix() {
    let tokens = the_dog_barks();
    let scores = ScoreMatrix::new(&tokens);
    assert_eq!(scores.size(), 4);
    assert_eq!(scores.num_tokens(), 3);
    for i in 0..4 {
        assert_eq!(scores.get(i, i), 0.0);
    }
    assert_eq!(scores.get(2, 1), scoring::score("Noun", "Determiner", 1));
    assert_eq!(scores.get(0, 3), scoring::score("ROOT", "Verb", 3));
    assert_eq!(scores.row(2)[1], scores.get(2, 1));
}

#[test]
fn test_arc_crossing() {
    assert!(Arc::new(3, 1).crosses(&Arc::new(4, 2)));
    assert!(Arc::new(2, 4).crosses(&Arc::new(1, 3)));
    // nested
    assert!(!Arc::new(0, 4).crosses(&Arc::new(1, 3)));
    // sharing an endpoint
    assert!(!Arc::new(1, 3).crosses(&Arc::new(3, 5)));
    assert!(!Arc::new(1, 3).crosses(&Arc::new(1, 2)));
    // disjoint
    assert!(!Arc::new(1, 2).crosses(&Arc::new(3, 4)));
}

#[test]
fn test_empty_input() {
    let tokens: Vec<Token> = vec![];
    for &algorithm in Algorithm::all().iter() {
        let graph = syntax::parse(algorithm, &tokens);
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}

#[test]
fn test_node_and_edge_counts() {
    let mut rng = StdRng::seed_from_u64(7);
    for len in 1..12 {
        let tokens = random_sentence(&mut rng, len);
        for &algorithm in Algorithm::all().iter() {
            let graph = syntax::parse(algorithm, &tokens);
            assert_eq!(graph.nodes.len(), len + 1, "{}", algorithm);
            assert_eq!(graph.edges.len(), len, "{}", algorithm);
            assert_eq!(graph.nodes[0].id, "ROOT");
            assert!(graph.edges.iter().all(|e| e.target != "ROOT"));
            let total_weight: f64 = graph.nodes.iter().map(|n| n.weight).sum();
            assert_eq!(total_weight, (2 * len + 1) as f64);
        }
    }
}

#[test]
fn test_node_ids() {
    let graph = graph::parse_projective(&the_dog_barks());
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["ROOT", "the_0", "dog_1", "barks_2"]);
    assert_eq!(graph.nodes[2].label, "dog");
    assert_eq!(graph.nodes[2].pos, "Noun");
}

#[test]
fn test_projective_the_dog_barks() {
    let tokens = the_dog_barks();
    let graph = graph::parse_projective(&tokens);
    assert_eq!(
        edge_pairs(&graph),
        vec![("dog_1", "the_0"), ("barks_2", "dog_1"), ("ROOT", "barks_2")]
    );
    let scores = ScoreMatrix::new(&tokens);
    assert_eq!(graph.edges[0].weight, scores.get(2, 1));
    assert_eq!(graph.edges[2].weight, scores.get(0, 3));
}

#[test]
fn test_projective_rejects_crossing_head() {
    let tokens = tokens_from_pairs(vec![
        ("the", "Determiner"),
        ("quickly", "Adverb"),
        ("dog", "Noun"),
        ("runs", "Verb"),
    ]);
    let scores = ScoreMatrix::new(&tokens);

    // The verb is the best head of the adverb, but that arc crosses the determiner's.
    let greedy = graph::chu_liu_edmonds(&scores);
    assert_eq!(greedy, vec![None, Some(3), Some(4), Some(4), Some(0)]);
    assert!(Arc::new(3, 1).crosses(&Arc::new(4, 2)));

    let projective = graph::eisner(&scores);
    assert_eq!(projective, vec![None, Some(3), Some(3), Some(4), Some(0)]);

    let graph = graph::parse_projective(&tokens);
    assert_eq!(
        edge_pairs(&graph),
        vec![
            ("dog_2", "the_0"),
            ("dog_2", "quickly_1"),
            ("runs_3", "dog_2"),
            ("ROOT", "runs_3"),
        ]
    );
}

#[test]
fn test_projective_never_crosses() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..300 {
        let len = rng.gen_range(1..16);
        let tokens = random_sentence(&mut rng, len);
        let heads = graph::eisner(&ScoreMatrix::new(&tokens));
        assert_eq!(heads[0], None);
        assert!(heads[1..].iter().all(|h| h.is_some()));
        let arcs = arcs_from_heads(&heads);
        for (i, a1) in arcs.iter().enumerate() {
            for a2 in &arcs[i + 1..] {
                assert!(!a1.crosses(a2), "{:?} crosses {:?} in {:?}", a1, a2, tokens);
            }
        }
    }
}

#[test]
fn test_greedy_keeps_cycles() {
    let tokens = tokens_from_pairs(vec![("cats", "Noun"), ("of", "Preposition")]);
    let graph = graph::parse_greedy_arborescence(&tokens);
    assert_eq!(edge_pairs(&graph), vec![("of_1", "cats_0"), ("cats_0", "of_1")]);
    assert!(graph.edges.iter().all(|e| e.source != "ROOT"));
    assert_eq!(graph.nodes[0].weight, 1.0);
}

#[test]
fn test_greedy_ties_prefer_lowest_head() {
    // Both candidate heads of the middle token are unknown categories at distance one.
    let tokens = tokens_from_pairs(vec![("a", "Foo"), ("b", "Noun"), ("c", "Foo")]);
    let heads = graph::chu_liu_edmonds(&ScoreMatrix::new(&tokens));
    assert_eq!(heads[2], Some(1));
}

#[test]
fn test_arc_standard_the_dog_barks() {
    let tokens = the_dog_barks();
    let graph = transition::parse_arc_standard(&tokens);
    assert_eq!(
        edge_pairs(&graph),
        vec![("dog_1", "the_0"), ("barks_2", "dog_1"), ("ROOT", "barks_2")]
    );
    let root_children = graph.edges.iter().filter(|e| e.source == "ROOT").count();
    assert_eq!(root_children, 1);

    let state = transition::run::<ArcStandard>(&ScoreMatrix::new(&tokens));
    let actions: Vec<String> = state
        .actions()
        .iter()
        .map(|&a| transition::ArcStandardActionType::from_action(a).to_string())
        .collect();
    assert_eq!(
        actions,
        vec!["Shift", "Shift", "LeftArc", "Shift", "LeftArc", "RightArc"]
    );
}

#[test]
fn test_arc_standard_allowed_actions() {
    let shift = ArcStandardActionType::Shift.into_action();
    let left = ArcStandardActionType::LeftArc.into_action();
    let right = ArcStandardActionType::RightArc.into_action();

    let mut state = State::with_capacity(3, 4);
    assert!(ArcStandard::is_allowed(shift, &state));
    assert!(!ArcStandard::is_allowed(left, &state));
    assert!(!ArcStandard::is_allowed(right, &state));
    assert!(ArcStandard::apply(left, &mut state).is_err());
    assert!(state.actions().is_empty());

    ArcStandard::apply(shift, &mut state).unwrap();
    // ROOT cannot become a dependent
    assert!(!ArcStandard::is_allowed(left, &state));
    assert!(ArcStandard::is_allowed(right, &state));

    ArcStandard::apply(shift, &mut state).unwrap();
    assert!(state.is_buffer_empty());
    assert!(!ArcStandard::is_allowed(shift, &state));
    assert!(ArcStandard::is_allowed(left, &state));

    ArcStandard::apply(left, &mut state).unwrap();
    ArcStandard::apply(right, &mut state).unwrap();
    assert!(ArcStandard::is_terminal(&state));
    assert_eq!(state.heads(), &[None, Some(2), Some(0)][..]);
    assert_eq!(state.actions(), &[shift, shift, left, right][..]);
}

#[test]
fn test_arc_standard_single_token() {
    let tokens = tokens_from_pairs(vec![("hello", "Interjection")]);
    let graph = transition::parse_arc_standard(&tokens);
    assert_eq!(edge_pairs(&graph), vec![("ROOT", "hello_0")]);
}

#[test]
fn test_arc_standard_terminates() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..300 {
        let len = rng.gen_range(1..20);
        let tokens = random_sentence(&mut rng, len);
        let state = transition::run::<ArcStandard>(&ScoreMatrix::new(&tokens));
        assert!(state.is_buffer_empty());
        assert_eq!(state.stack_size(), 1);
        assert!(state.actions().len() <= 2 * len);
        assert_eq!(state.arcs().len(), len);
        assert_eq!(state.head(0), None);
        assert!(state.heads()[1..].iter().all(|h| h.is_some()));
    }
}

#[test]
fn test_algorithm_from_str() {
    assert_eq!("eisner".parse::<Algorithm>(), Ok(Algorithm::Projective));
    assert_eq!("Greedy".parse::<Algorithm>(), Ok(Algorithm::Greedy));
    assert_eq!("arc-standard".parse::<Algorithm>(), Ok(Algorithm::ArcStandard));
    assert!("cky".parse::<Algorithm>().is_err());
    for &algorithm in Algorithm::all().iter() {
        assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
    }
}

#[test]
fn test_parse_corpus_concatenates() {
    let corpus = vec![the_dog_barks(), tokens_from_pairs(vec![("run", "Verb")])];
    let graph = syntax::parse_corpus(Algorithm::Greedy, &corpus);
    assert_eq!(graph.nodes.len(), 4 + 2);
    assert_eq!(graph.edges.len(), 3 + 1);
    assert_eq!(graph.edges[3].target, "run_0");
}
