extern crate depsampler;
extern crate tempfile;

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

use depsampler::dataset::conll::{self, Entry};
use depsampler::io::{FileOpen, Format, FromLine, Read, Serializer, Write as RecordWrite};
use depsampler::lang::tokens_from_pairs;
use depsampler::syntax::{self, Algorithm, ParseGraph};
use tempfile::NamedTempFile;

static CONLL_TEXT: &'static str = "\
# sent_id = 1
1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tdog\tdog\tNOUN\tNN\t_\t3\tnsubj\t_\t_
3\tbarks\tbark\tVERB\tVBZ\t_\t0\troot\t_\t_

# sent_id = 2
1\tBirds\tbird\t_\tNNS
2\tfly\tfly\t_\t_



";

fn write_temp(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_entry_from_line() {
    let entry = Entry::from_line("4\tran\trun\tVERB\tVBD\t_\t0\troot\t_\t_").unwrap();
    assert_eq!(entry.id, 4);
    assert_eq!(entry.form, "ran");
    assert_eq!(entry.lemma, Some("run".to_string()));
    assert_eq!(entry.pos(), "VERB");

    let entry = Entry::from_line("1\tok\t_\t_\tUH").unwrap();
    assert_eq!(entry.lemma, None);
    assert_eq!(entry.pos(), "UH");

    let entry = Entry::from_line("1\tok\t_\t_\t_").unwrap();
    assert_eq!(entry.pos(), conll::UNKNOWN_POSTAG);
}

#[test]
fn test_entry_from_line_malformed() {
    let err = Entry::from_line("1\ttoo\tfew").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    let err = Entry::from_line("one\tdog\t_\tNOUN\tNN").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_load_conll() {
    let file = write_temp(CONLL_TEXT);
    let dataset = conll::load(file.path()).unwrap();
    assert_eq!(dataset.len(), 2);
    let lengths: Vec<usize> = dataset.iter().map(|s| s.len()).collect();
    assert_eq!(lengths, vec![3, 2]);

    let first = &dataset[0];
    assert_eq!(first.len(), 3);
    assert_eq!(first[0].text(), "The");
    assert_eq!(first[0].pos(), "Determiner");
    assert_eq!(first[1].pos(), "Noun");
    assert_eq!(first[2].pos(), "Verb");
    assert_eq!(first[2].idx(), 2);

    let second = &dataset[1];
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].pos(), "Noun");
    assert_eq!(second[1].pos(), conll::UNKNOWN_POSTAG);
}

#[test]
fn test_tag_categories() {
    assert_eq!(conll::category("DT"), "Determiner");
    assert_eq!(conll::category("NNS"), "Noun");
    assert_eq!(conll::category("NNPS"), "ProperNoun");
    assert_eq!(conll::category("PROPN"), "ProperNoun");
    assert_eq!(conll::category("VBZ"), "Verb");
    assert_eq!(conll::category("JJR"), "Adjective");
    assert_eq!(conll::category("RB"), "Adverb");
    assert_eq!(conll::category("ADP"), "Preposition");
    assert_eq!(conll::category("PRP$"), "Pronoun");
    assert_eq!(conll::category("CCONJ"), "Conjunction");
    assert_eq!(conll::category("CD"), "Value");
    assert_eq!(conll::category("INTJ"), "INTJ");
    assert_eq!(conll::category(conll::UNKNOWN_POSTAG), conll::UNKNOWN_POSTAG);
}

#[test]
fn test_parse_conll_sentence() {
    let file = write_temp(CONLL_TEXT);
    let dataset = conll::load(file.path()).unwrap();
    for &algorithm in Algorithm::all().iter() {
        let graph = syntax::parse(algorithm, &dataset[0]);
        let edges: Vec<(&str, &str)> = graph
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![("dog_1", "The_0"), ("barks_2", "dog_1"), ("ROOT", "barks_2")],
            "{}",
            algorithm
        );
    }
}

#[test]
fn test_read_upto() {
    let file = write_temp(CONLL_TEXT);
    let mut reader = conll::Reader::<io::BufReader<File>>::open(file.path()).unwrap();
    let mut sentences = vec![];
    assert_eq!(reader.read_upto(1, &mut sentences).unwrap(), 1);
    assert_eq!(sentences.len(), 1);
    assert_eq!(reader.read_upto(5, &mut sentences).unwrap(), 1);
    assert_eq!(reader.read_upto(5, &mut sentences).unwrap(), 0);
    assert_eq!(sentences[1][1].text(), "fly");
}

#[test]
fn test_load_conll_malformed() {
    let file = write_temp("1\tThe\tthe\tDET\tDT\n2\tdog\n");
    let err = conll::load(file.path()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_load_conll_empty() {
    let file = write_temp("\n\n# nothing\n");
    let dataset = conll::load(file.path()).unwrap();
    assert!(dataset.is_empty());
}

#[test]
fn test_serialize_graphs() {
    let tokens = tokens_from_pairs(vec![("the", "Determiner"), ("dog", "Noun"), ("barks", "Verb")]);
    let graphs: Vec<ParseGraph> = Algorithm::all()
        .iter()
        .map(|&algorithm| syntax::parse(algorithm, &tokens))
        .collect();

    let mut file = tempfile::tempfile().unwrap();
    {
        let mut serializer = Serializer::new(&mut file, Format::Json);
        assert_eq!(serializer.write(&graphs).unwrap(), 3);
        serializer.flush().unwrap();
    }
    file.seek(SeekFrom::Start(0)).unwrap();

    let mut serializer = Serializer::<_, ParseGraph>::new(io::BufReader::new(file), Format::Json);
    let mut restored = vec![];
    assert_eq!(serializer.read(&mut restored).unwrap(), 3);
    for (restored, graph) in restored.iter().zip(graphs.iter()) {
        assert_eq!(restored.nodes.len(), graph.nodes.len());
        for (e1, e2) in restored.edges.iter().zip(graph.edges.iter()) {
            assert_eq!(e1.source, e2.source);
            assert_eq!(e1.target, e2.target);
            assert!((e1.weight - e2.weight).abs() < 1e-12);
        }
    }
}

#[test]
fn test_serialize_json_fields() {
    let tokens = tokens_from_pairs(vec![("cats", "Noun"), ("sleep", "Verb")]);
    let graph = syntax::parse(Algorithm::Greedy, &tokens);
    let bytes = depsampler::io::serialize(&graph, Format::Json).unwrap();
    let json = String::from_utf8(bytes).unwrap();
    assert!(json.contains("\"nodes\""));
    assert!(json.contains("\"edges\""));
    assert!(json.contains("\"ROOT\""));
    assert!(json.contains("\"sleep_1\""));
}
