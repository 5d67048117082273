use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ownercheck_core::CommentArgs;

fn generate_comment_args(num_args: usize) -> String {
    (0..num_args)
        .map(|i| {
            let arg = match i % 4 {
                0 => format!("-var=region_{}", i),
                1 => format!("-target=module.vpc[{}]", i),
                2 => "--auto-approve".to_string(),
                _ => format!("a,b,c_{}", i),
            };
            arg.chars().flat_map(|c| ['\\', c]).collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("comment_args_decode");

    for size in [1, 10, 100, 1000] {
        let input = generate_comment_args(size);

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| CommentArgs::decode(black_box(input)).unwrap());
        });
    }

    group.finish();
}

fn bench_decode_rejects(c: &mut Criterion) {
    let mut group = c.benchmark_group("comment_args_reject");

    let ambiguous = "\\,".repeat(512);
    group.bench_function("ambiguous", |b| {
        b.iter(|| CommentArgs::decode(black_box(&ambiguous)).unwrap_err());
    });

    let mut malformed = generate_comment_args(100);
    malformed.push_str(",unescaped");
    group.bench_function("malformed_tail", |b| {
        b.iter(|| CommentArgs::decode(black_box(&malformed)).unwrap_err());
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_decode_rejects);
criterion_main!(benches);
