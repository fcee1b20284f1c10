use std::fs;

use serde_json::json;
use tempfile::tempdir;

use vibescore::analysis::tokenize;
use vibescore::nb::{CorpusReader, NbModel, NbTrainer, explain, predict};

fn toy_model() -> NbModel {
    let record = json!({
        "labels": ["wholesome", "unhinged"],
        "alpha": 1,
        "docCount": {"wholesome": 1, "unhinged": 1},
        "tokenCount": {"wholesome": 2, "unhinged": 2},
        "tokenFreq": {
            "wholesome": {"cozy": 1, "warm": 1},
            "unhinged": {"weird": 1, "crack": 1}
        },
        "vocabSize": 4
    });
    NbModel::from_json_str(&record.to_string()).unwrap()
}

const STORIES: &[&str] = &[
    "",
    "cozy warm",
    "weird crack",
    "The colour of the moon was WEIRD, and the mitten said hi.",
    "nothing in the vocabulary at all",
    "cozy cozy cozy weird",
];

#[test]
fn test_toy_model_predictions() {
    let model = toy_model();
    assert_eq!(predict("cozy warm", &model).label, "wholesome");
    assert_eq!(predict("weird crack", &model).label, "unhinged");
}

#[test]
fn test_probabilities_sum_to_one() {
    let model = toy_model();
    for story in STORIES {
        let prediction = predict(story, &model);
        let total: f64 = prediction.probs.values().sum();
        assert!((total - 1.0).abs() < 1e-9, "{story:?} sums to {total}");
        assert!(prediction.probs.values().all(|p| (0.0..=1.0).contains(p)));
        assert!(model.labels().contains(&prediction.label));
    }
}

#[test]
fn test_predictions_are_deterministic() {
    let model = toy_model();
    for story in STORIES {
        let first = predict(story, &model);
        let second = predict(story, &model);
        for label in model.labels() {
            assert_eq!(
                first.probability(label).to_bits(),
                second.probability(label).to_bits()
            );
        }
    }
}

#[test]
fn test_explain_bounds() {
    let model = toy_model();
    for story in STORIES {
        let distinct: std::collections::HashSet<String> = tokenize(story).into_iter().collect();
        for k in [0, 1, 3, 10] {
            let contributions = explain(story, &model, k);
            assert!(contributions.len() <= k);
            assert!(contributions.len() <= distinct.len());
            assert!(
                contributions
                    .windows(2)
                    .all(|pair| pair[0].contrib >= pair[1].contrib)
            );
        }
    }
}

#[test]
fn test_train_save_load_round_trip() {
    let dir = tempdir().unwrap();
    let wholesome = dir.path().join("wholesome.csv");
    let unhinged = dir.path().join("unhinged.csv");

    fs::write(
        &wholesome,
        "generatedText,label\n\
         \"A warm mitten, a cozy fire.\",wholesome\n\
         Snow fell softly on my neighbor,wholesome\n\
         The colour of cocoa,kinda odd\n\
         \n",
    )
    .unwrap();
    fs::write(
        &unhinged,
        "label,generatedText\n\
         totally unhinged,The mitten SCREAMED and bit the moon\n\
         totally unhinged,\"teeth, teeth, so many teeth\"\n\
         mystery,this row has a label nobody trains on\n",
    )
    .unwrap();

    let documents = CorpusReader::new()
        .read_paths(&[wholesome.as_path(), unhinged.as_path()])
        .unwrap();
    assert_eq!(documents.len(), 6);

    let model = NbTrainer::new().train(&documents);
    assert_eq!(model.doc_count("wholesome"), 2);
    assert_eq!(model.doc_count("kinda odd"), 1);
    assert_eq!(model.doc_count("totally unhinged"), 2);
    assert_eq!(model.total_docs(), 5);
    assert_eq!(model.token_count("mystery"), 0);
    // American spellings are folded into the Canadian forms.
    assert_eq!(model.token_freq("wholesome", "neighbour"), 1);
    assert_eq!(model.token_freq("wholesome", "neighbor"), 0);
    assert_eq!(model.token_freq("totally unhinged", "teeth"), 3);

    for label in model.labels() {
        let sum: u64 = model
            .token_frequencies(label)
            .map(|freqs| freqs.values().sum())
            .unwrap_or(0);
        assert_eq!(sum, model.token_count(label));
    }

    let path = dir.path().join("models").join("nb_model.json");
    model.save(&path).unwrap();
    let loaded = NbModel::from_path(&path).unwrap();
    assert_eq!(loaded, model);

    for story in STORIES {
        let original = predict(story, &model);
        let restored = predict(story, &loaded);
        assert_eq!(original, restored);
    }

    assert_eq!(predict("a cozy warm fire", &loaded).label, "wholesome");
    assert_eq!(predict("teeth teeth screamed", &loaded).label, "totally unhinged");
}

#[test]
fn test_lenient_model_loading() {
    let model = NbModel::from_json_str(r#"{"labels": ["a", "b"]}"#).unwrap();
    assert_eq!(model.alpha(), 1.0);
    assert_eq!(model.vocab_size(), 0);
    let prediction = predict("anything goes", &model);
    assert_eq!(prediction.label, "a");
    assert!((prediction.probability("a") - 0.5).abs() < 1e-12);

    assert!(NbModel::from_json_str(r#"{"alpha": 1}"#).is_err());
    assert!(NbModel::from_json_str(r#"{"labels": []}"#).is_err());
}
