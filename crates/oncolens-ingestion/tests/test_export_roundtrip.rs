//! Exported documents fed back through the batch runner.

use oncolens_common::Label;
use oncolens_ingestion::{
    export_predictions, export_records, BatchError, BatchRunner, BatchSummary, SAMPLE_BATCH_CSV,
};
use oncolens_ranker::Scorer;
use oncolens_test_utils::{
    assert_eq, batch_document, benign_measurements, malignant_measurements, measurement_fields,
    ID_HEADER, NEAR_MEAN_ROW,
};

fn mixed_document() -> String {
    let malignant = format!("M1,{}", measurement_fields(&malignant_measurements()));
    let benign = format!("B1,{}", measurement_fields(&benign_measurements()));
    batch_document(
        ID_HEADER,
        &[NEAR_MEAN_ROW, &malignant, "X9,not,enough", &benign],
    )
}

#[test]
fn test_records_export_reproduces_labels() {
    let scorer = Scorer::default();
    let runner = BatchRunner::new(&scorer);

    let first = runner.run(&mixed_document()).unwrap();
    assert_eq!(first.scored_count(), 3);
    assert_eq!(first.skipped_count(), 1);

    let exported = export_records(&first.predictions).unwrap();
    let second = runner.run(&exported).unwrap();

    assert_eq!(second.scored_count(), first.scored_count());
    assert_eq!(second.skipped_count(), 0);
    let labels = |o: &oncolens_ingestion::BatchOutcome| -> Vec<(String, Label)> {
        o.predictions
            .iter()
            .map(|p| (p.record.id.clone(), p.result.label))
            .collect()
    };
    assert_eq!(labels(&second), labels(&first));
    assert_eq!(
        labels(&first).iter().map(|(_, l)| *l).collect::<Vec<_>>(),
        vec![Label::Benign, Label::Malignant, Label::Benign]
    );
}

#[test]
fn test_sample_roundtrip_keeps_metadata() {
    let scorer = Scorer::default();
    let runner = BatchRunner::new(&scorer);

    let first = runner.run(SAMPLE_BATCH_CSV).unwrap();
    let second = runner.run(&export_records(&first.predictions).unwrap()).unwrap();

    for (a, b) in first.predictions.iter().zip(second.predictions.iter()) {
        assert_eq!(a.record, b.record);
        assert_eq!(a.result.label, b.result.label);
        assert!((a.result.probability - b.result.probability).abs() < 1e-12);
    }
    assert_eq!(
        BatchSummary::from_outcome(&first),
        BatchSummary::from_outcome(&second)
    );
}

#[test]
fn test_prediction_table_is_not_a_batch_input() {
    let scorer = Scorer::default();
    let runner = BatchRunner::new(&scorer);
    let first = runner.run(SAMPLE_BATCH_CSV).unwrap();

    let table = export_predictions(&first.predictions);
    assert_eq!(table.lines().count(), 4);
    assert!(table.lines().nth(1).unwrap().starts_with("P001,\"Patient One\",45,"));

    match runner.run(&table) {
        Err(BatchError::MissingColumns(cols)) => assert_eq!(cols.len(), 10),
        other => panic!("expected MissingColumns, got {:?}", other.map(|o| o.scored_count())),
    }
}

#[test]
fn test_multiline_name_survives_roundtrip() {
    let scorer = Scorer::default();
    let runner = BatchRunner::new(&scorer);
    let doc = format!(
        "id,name,{}\nP1,\"Ward A\n\nBed 4\",{}\n",
        ID_HEADER.trim_start_matches("id,"),
        NEAR_MEAN_ROW.trim_start_matches("P1,")
    );

    let first = runner.run(&doc).unwrap();
    assert_eq!(first.predictions[0].record.name.as_deref(), Some("Ward A\n\nBed 4"));

    let second = runner.run(&export_records(&first.predictions).unwrap()).unwrap();
    assert_eq!(second.scored_count(), 1);
    assert_eq!(second.predictions[0].record, first.predictions[0].record);
}
