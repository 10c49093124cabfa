//! Benchmark – `yamlmodem::YamlParser` and `yamlmodem::YamlGenerator`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use yamlmodem::{
    DocumentEvent, EventQueue, EventRecorder, GeneratorOptions, ParserOptions, ScalarStyle,
    YamlGenerator, YamlParser,
};

/// A deterministic document: a sequence of `records` mappings mixing every
/// scalar type the resolver knows about.
fn make_events(records: usize) -> Vec<DocumentEvent> {
    let mut events = vec![
        DocumentEvent::StreamStart,
        DocumentEvent::DocumentStart { explicit: true },
        DocumentEvent::sequence_start(),
    ];
    for i in 0..records {
        events.push(DocumentEvent::mapping_start());
        events.push(DocumentEvent::plain("id"));
        events.push(DocumentEvent::plain(i.to_string()));
        events.push(DocumentEvent::plain("score"));
        events.push(DocumentEvent::plain(format!("{i}.25")));
        events.push(DocumentEvent::plain("active"));
        events.push(DocumentEvent::plain(if i % 2 == 0 { "yes" } else { "off" }));
        events.push(DocumentEvent::plain("name"));
        events.push(DocumentEvent::styled(format!("user-{i}"), ScalarStyle::DoubleQuoted));
        events.push(DocumentEvent::plain("host"));
        events.push(DocumentEvent::plain("10.12.45.127"));
        events.push(DocumentEvent::MappingEnd);
    }
    events.extend([
        DocumentEvent::SequenceEnd,
        DocumentEvent::DocumentEnd,
        DocumentEvent::StreamEnd,
    ]);
    events
}

/// Pulls every token and realizes every number. Returns the token count so
/// the work can be black-boxed.
fn run_parser(events: &[DocumentEvent], options: ParserOptions) -> usize {
    let mut parser = YamlParser::new(EventQueue::from_events(events.iter().cloned()), options);
    let mut produced = 0usize;
    while let Some(kind) = parser.next_token().unwrap() {
        if kind.is_numeric() {
            black_box(parser.double_value().unwrap());
        }
        produced += 1;
    }
    produced
}

fn run_generator(records: usize) -> usize {
    let mut sink = EventRecorder::new();
    {
        let mut g = YamlGenerator::new(&mut sink, GeneratorOptions::default()).unwrap();
        g.write_start_array().unwrap();
        for i in 0..records {
            g.write_start_object().unwrap();
            g.write_field_name("id").unwrap();
            g.write_i64(i64::try_from(i).unwrap()).unwrap();
            g.write_field_name("score").unwrap();
            g.write_f64(i as f64 + 0.25).unwrap();
            g.write_field_name("active").unwrap();
            g.write_bool(i % 2 == 0).unwrap();
            g.write_string_field("name", "user").unwrap();
            g.write_end_object().unwrap();
        }
        g.write_end_array().unwrap();
        g.close().unwrap();
    }
    sink.events().len()
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    for &records in &[100usize, 1_000, 10_000] {
        let events = make_events(records);
        group.throughput(Throughput::Elements(events.len() as u64));
        for decimal_floats in [false, true] {
            let name = if decimal_floats { "decimal" } else { "f64" };
            let options = ParserOptions { decimal_floats };
            group.bench_with_input(BenchmarkId::new(name, records), &events, |b, events| {
                b.iter(|| black_box(run_parser(black_box(events), options)));
            });
        }
    }
    group.finish();
}

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    for &records in &[100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(records), &records, |b, &n| {
            b.iter(|| black_box(run_generator(n)));
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_parser, bench_generator }
criterion_main!(benches);
