// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end search semantics through the library API, using a
//! deterministic fake embedding provider.

use anyhow::Result;

use vidgrep::embedding::{l2_normalize, EmbeddingProvider};
use vidgrep::index::VideoSearchEngine;
use vidgrep::transcript::{ChunkConfig, Segment, TranscriptChunk, TranscriptChunker};

/// Bag-of-words fake: one axis per vocabulary word, counts normalized to
/// unit length. Deterministic and fixed-dimension, like a real provider.
struct BagOfWordsProvider {
    vocab: Vec<&'static str>,
}

impl BagOfWordsProvider {
    fn new(vocab: Vec<&'static str>) -> Self {
        Self { vocab }
    }
}

impl EmbeddingProvider for BagOfWordsProvider {
    fn model_id(&self) -> &str {
        "bag-of-words-fake"
    }

    fn batch_size(&self) -> usize {
        32
    }

    fn embed_texts(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut vector: Vec<f32> = self
                    .vocab
                    .iter()
                    .map(|word| {
                        text.split_whitespace().filter(|t| t == word).count() as f32
                    })
                    .collect();
                l2_normalize(&mut vector);
                vector
            })
            .collect())
    }
}

fn seg(start: f64, end: f64, text: &str) -> Segment {
    Segment {
        start,
        end,
        text: text.to_string(),
    }
}

fn lecture_engine() -> VideoSearchEngine {
    let provider = BagOfWordsProvider::new(vec![
        "machine",
        "regression",
        "classification",
        "neural",
        "backpropagation",
    ]);
    let mut engine = VideoSearchEngine::new(
        Box::new(provider),
        TranscriptChunker::new(ChunkConfig::new(30.0).unwrap()),
    );

    engine
        .ingest_segments(
            "video_001",
            &[
                seg(0.0, 25.0, "machine learning basics"),
                seg(30.0, 55.0, "regression methods"),
                seg(60.0, 90.0, "classification problems"),
            ],
        )
        .unwrap();
    engine
        .ingest_segments(
            "video_002",
            &[
                seg(0.0, 25.0, "neural networks"),
                seg(30.0, 55.0, "backpropagation explained"),
            ],
        )
        .unwrap();

    engine
}

#[test]
fn top_result_matches_query_topic() {
    let mut engine = lecture_engine();
    let results = engine.search("regression", 1).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].video_id, "video_001");
    assert!(results[0].text.contains("regression"));
    assert!((results[0].similarity_score - 1.0).abs() < 1e-6);
}

#[test]
fn identical_vector_scores_one() {
    let mut engine = lecture_engine();
    // The query text embeds to exactly the stored chunk's vector.
    let results = engine.search("backpropagation explained", 1).unwrap();
    assert_eq!(results[0].video_id, "video_002");
    assert!((results[0].similarity_score - 1.0).abs() < 1e-6);
}

#[test]
fn k_saturation_across_corpus() {
    let mut engine = lecture_engine();
    assert_eq!(engine.search("machine", 100).unwrap().len(), 5);
    assert_eq!(engine.search("machine", 2).unwrap().len(), 2);
}

#[test]
fn scoped_search_is_consistent_with_filtered_global_search() {
    let mut engine = lecture_engine();

    let scoped = engine
        .search_by_video("video_002", "neural backpropagation", 10)
        .unwrap();
    assert!(scoped.iter().all(|r| r.video_id == "video_002"));

    let filtered: Vec<_> = engine
        .search("neural backpropagation", 100)
        .unwrap()
        .into_iter()
        .filter(|r| r.video_id == "video_002")
        .collect();
    assert_eq!(scoped, filtered);
}

#[test]
fn video_ids_grow_only_with_new_videos() {
    let mut engine = lecture_engine();
    assert_eq!(engine.get_all_videos().len(), 2);

    engine
        .ingest_segments("video_001", &[seg(90.0, 100.0, "machine recap")])
        .unwrap();
    assert_eq!(engine.get_all_videos().len(), 2);

    engine
        .ingest_segments("video_003", &[seg(0.0, 10.0, "neural outro")])
        .unwrap();
    assert_eq!(engine.get_all_videos().len(), 3);
}

#[test]
fn summary_reports_duration_and_count() {
    let engine = lecture_engine();
    let summary = engine.get_video_summary("video_001").unwrap();
    assert_eq!(summary.total_duration, 90.0);
    assert_eq!(summary.chunk_count, 3);
    assert_eq!(summary.duration_formatted, "01:30");
}

#[test]
fn pre_embedded_chunks_are_accepted() {
    let provider = BagOfWordsProvider::new(vec!["a", "b", "c"]);
    let mut engine =
        VideoSearchEngine::new(Box::new(provider), TranscriptChunker::with_defaults());

    engine
        .add_chunks(vec![
            TranscriptChunk::new("v", 0.0, 30.0, "first").with_embedding(vec![1.0, 0.0, 0.0]),
            TranscriptChunk::new("v", 30.0, 60.0, "second").with_embedding(vec![0.0, 1.0, 0.0]),
        ])
        .unwrap();

    let results = engine.search("b", 1).unwrap();
    assert_eq!(results[0].text, "second");
}
