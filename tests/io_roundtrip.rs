use std::fs;

use crest::cluster::{analyze, assign, DistanceModel, PairwiseDistances, Thresholds};
use crest::io;
use crest::{evaluate, DensityPeaks};

const IRIS_SAMPLE: &str = "\
5.1,3.5,1.4,0.2,Iris-setosa
4.9,3.0,1.4,0.2,Iris-setosa
4.7,3.2,1.3,0.2,Iris-setosa
4.6,3.1,1.5,0.2,Iris-setosa
5.0,3.6,1.4,0.2,Iris-setosa
7.0,3.2,4.7,1.4,Iris-versicolor
6.4,3.2,4.5,1.5,Iris-versicolor
6.9,3.1,4.9,1.5,Iris-versicolor
5.5,2.3,4.0,1.3,Iris-versicolor
6.5,2.8,4.6,1.5,Iris-versicolor
";

#[test]
fn candidate_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("sample.data");
    fs::write(&data_path, IRIS_SAMPLE).unwrap();

    let ds = io::load_dataset(&data_path).unwrap();
    assert_eq!(ds.len(), 10);

    let table = PairwiseDistances::compute(&ds.features, DistanceModel::Gaussian).unwrap();
    let list = analyze(&table, 0.3);

    let cand_path = dir.path().join("candidates.tsv");
    io::dump_candidates(&cand_path, &list).unwrap();
    let reloaded = io::load_candidates(&cand_path).unwrap();

    assert_eq!(reloaded, list);

    let thresholds = Thresholds::new(1, 0.38);
    assert_eq!(
        assign(&reloaded, &thresholds).unwrap(),
        assign(&list, &thresholds).unwrap()
    );
}

#[test]
fn candidate_file_format() {
    let data: Vec<Vec<f64>> = [0.0, 0.1, 5.0, 5.1].iter().map(|&x| vec![x]).collect();
    let table = PairwiseDistances::compute(&data, DistanceModel::Euclidean).unwrap();
    let list = analyze(&table, 0.5);

    let mut out = Vec::new();
    io::write_candidates(&mut out, &list).unwrap();
    let text = String::from_utf8(out).unwrap();
    let first: Vec<&str> = text.lines().next().unwrap().split('\t').collect();

    assert_eq!(first[0], "0");
    assert_eq!(first[1], "1");
    assert_eq!(first[2].parse::<f64>().unwrap(), table.max_distance());
    assert_eq!(first[3], "-1");
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn report_for_separated_pairs() {
    let text = "0.0,a\n0.1,a\n5.0,b\n5.1,b\n";
    let ds = io::read_dataset(text.as_bytes()).unwrap();

    let fit = DensityPeaks::new()
        .with_cutoff(0.5)
        .with_min_density(1)
        .with_min_delta(0.5)
        .fit(&ds.features)
        .unwrap();
    let eval = evaluate(fit.labels(), &ds.labels).unwrap();
    assert_eq!(eval.correct, 4);
    assert_eq!(eval.precision(), Some(1.0));
    assert_eq!(eval.recall(), Some(1.0));

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.tsv");
    io::dump_report(&report_path, &eval, fit.labels(), &ds.labels, &fit.confidence).unwrap();

    let report = fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "CORRECT\t0\ta\ta\t1.0000");
    assert_eq!(lines[3], "CORRECT\t3\tb\tb\t1.0000");
}
