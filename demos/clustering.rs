//! Density peaks on a simple 2D dataset, with the decision-graph values printed.

use crest::{evaluate, DensityPeaks, DistanceModel};

fn main() {
    // Three well-separated clusters in 2D.
    let data: Vec<Vec<f64>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ];
    let truth = ["A", "A", "A", "A", "B", "B", "B", "B", "C", "C", "C", "C"];

    let model = DensityPeaks::new()
        .with_model(DistanceModel::Euclidean)
        .with_cutoff(0.35)
        .with_min_density(2)
        .with_min_delta(1.0);
    let fit = model.fit(&data).unwrap();

    println!("=== Decision graph (dc = {:.2}) ===", fit.cutoff.dc);
    for c in &fit.candidates {
        let nearest = c
            .nearest_higher
            .map_or_else(|| "-".to_string(), |nh| nh.to_string());
        println!(
            "  point {:2} density {:2} delta {:6.3} nearest denser {}",
            c.id, c.density, c.delta, nearest
        );
    }

    println!("\n=== Assignment ===");
    println!("  centers: {:?}", fit.centers());
    for (i, label) in fit.labels().iter().enumerate() {
        let tag = match label {
            Some(center) => format!("center {}", center),
            None => "UNASSIGNED".to_string(),
        };
        let conf = fit.confidence[i].map_or_else(|| "-".to_string(), |s| format!("{:.2}", s));
        println!(
            "  point {:2} ({:5.1}, {:5.1}) => {} (confidence {})",
            i, data[i][0], data[i][1], tag, conf
        );
    }

    let eval = evaluate(fit.labels(), &truth).unwrap();
    println!(
        "\ncorrect {}/{}  precision {:?}  recall {:?}",
        eval.correct,
        eval.total,
        eval.precision(),
        eval.recall()
    );
}
