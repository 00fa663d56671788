use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    BenchmarkId,
    Criterion,
    Throughput,
};
use rand::Rng;

use strobe_framework::strobe::{
    protocol::tags,
    DuplexOps,
    Flags,
    KeccakF1600,
    Strobe,
};

type Session = Strobe<KeccakF1600>;

fn keyed_session() -> Session {
    let mut session = Session::new("bench").unwrap();
    session.key(b"benchmark key").unwrap();
    session
}

fn random_payload(size: usize) -> Vec<u8> {
    let mut payload = vec![0; size];
    rand::thread_rng().fill(payload.as_mut_slice());
    payload
}

pub fn encryption(c: &mut Criterion) {
    let mut group = c.benchmark_group("send_enc");
    for size in [64_usize, 1024, 16 * 1024].iter() {
        let payload = random_payload(*size);
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("raw", size), &payload, |b, payload| {
            let mut session = keyed_session();
            b.iter(|| session.send_enc(black_box(payload)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("framed + mac", size), &payload, |b, payload| {
            let mut session = keyed_session();
            b.iter(|| {
                let mut wire = session.send(&tags::APP_CIPHERTEXT, black_box(payload), None).unwrap();
                wire.extend(session.send(&tags::MAC, &[], None).unwrap());
                wire
            })
        });
    }
    group.finish();
}

pub fn siv(c: &mut Criterion) {
    let mut group = c.benchmark_group("siv");
    for size in [64_usize, 1024, 16 * 1024].iter() {
        let payload = random_payload(*size);
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("seal", size), &payload, |b, payload| {
            let mut session = keyed_session();
            b.iter(|| session.send_siv(black_box(payload)).unwrap())
        });
        let envelope = keyed_session().send_siv(&payload).unwrap();
        group.bench_with_input(BenchmarkId::new("open", size), &envelope, |b, envelope| {
            let session = keyed_session();
            b.iter(|| session.fork().recv_siv(black_box(envelope)).unwrap())
        });
    }
    group.finish();
}

pub fn keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("keys");
    let key = random_payload(32);
    group.bench_function("key", |b| {
        let mut session = keyed_session();
        b.iter(|| session.key(black_box(&key)).unwrap())
    });
    group.bench_function("keytree", |b| {
        let mut session = keyed_session();
        b.iter(|| {
            session
                .duplex(Flags::KEY | Flags::KEYTREE, black_box(&key), None)
                .unwrap()
        })
    });
    group.bench_function("prf 32", |b| {
        let mut session = keyed_session();
        b.iter(|| session.prf(32).unwrap())
    });
    group.finish();
}

criterion_group!(benches, encryption, siv, keys);
criterion_main!(benches);
