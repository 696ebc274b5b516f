//! Integration tests for segmentation of realistic article text

use wikisent_core::{DocumentId, Segmenter, SegmenterConfig, StartClass};

#[test]
fn test_article_paragraph() {
    let text = "Anarchism is a political philosophy. It is skeptical of authority! \
                Mr. Proudhon wrote \"What is Property?\" That book appeared in 1840. \
                its influence grew in the 19th century.";
    let sentences = Segmenter::new().split(text);

    assert_eq!(
        sentences,
        vec![
            "Anarchism is a political philosophy.",
            "It is skeptical of authority!",
            "Mr. Proudhon wrote \"What is Property?\"",
            "That book appeared in 1840.",
        ]
    );
}

#[test]
fn test_end_to_end_records() {
    let segmenter = Segmenter::new();
    let id = DocumentId::from(42u64);
    let lines: Vec<String> = segmenter
        .segment("This is one. This is two!")
        .map(|span| span.to_record(&id))
        .map(|record| format!("{}\t{}", record.id, record.sentence))
        .collect();

    assert_eq!(lines, vec!["42\tThis is one.", "42\tThis is two!"]);
}

#[test]
fn test_reconstruction_with_whitespace() {
    let text = "One sentence here.  Another one there? And a last one";
    let segmenter = Segmenter::new();
    let spans: Vec<_> = segmenter.segment(text).collect();

    let mut rebuilt = String::new();
    let mut pos = 0;
    for span in &spans {
        rebuilt.push_str(&text[pos..span.start()]);
        rebuilt.push_str(span.as_str());
        pos = span.end();
    }
    rebuilt.push_str(&text[pos..]);

    assert_eq!(rebuilt, text);
    assert_eq!(spans.len(), 3);
}

#[test]
fn test_pathological_punctuation_runs() {
    let text = format!("Start{}", ".".repeat(100_000));
    let sentences = Segmenter::new().split(&text);
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0].len(), text.len());

    let quotes = "\"".repeat(10_000);
    assert_eq!(Segmenter::new().split(&quotes).len(), 1);
}

#[test]
fn test_configured_from_toml() {
    let config: SegmenterConfig = toml::from_str(
        r#"
start_class = "unicode"
abbreviations = ["Fig"]
"#,
    )
    .unwrap();
    assert_eq!(config.start_class, StartClass::Unicode);

    let segmenter = Segmenter::with_config(&config).unwrap();
    assert_eq!(
        segmenter.split("See Fig. Three below. Über alles."),
        vec!["See Fig. Three below.", "Über alles."]
    );
    assert_eq!(
        segmenter.split("Dr. No."),
        vec!["Dr.", "No."]
    );
}
