#[macro_use]
extern crate bencher;
extern crate estate_recommender;
extern crate rand;

use bencher::Bencher;
use rand::Rng;

use estate_recommender::catalog::PropertyCatalog;
use estate_recommender::similarity::{
    recommend, CompositeSimilarity, SimilarityMatrix, WeightedSignal,
};

benchmark_group!(benches, bench_recommend_top_5, bench_recommend_all);
benchmark_main!(benches);

const NUM_PROPERTIES: usize = 2_000;

fn random_symmetric_matrix(keys: &[String]) -> SimilarityMatrix {
    let mut rng = rand::thread_rng();
    let dim = keys.len();
    let mut values = vec![0.0; dim * dim];
    for row in 0..dim {
        values[row * dim + row] = 1.0;
        for column in (row + 1)..dim {
            let similarity: f64 = rng.gen_range(0.0..1.0);
            values[row * dim + column] = similarity;
            values[column * dim + row] = similarity;
        }
    }
    SimilarityMatrix::new(keys.to_vec(), values).unwrap()
}

fn composite() -> CompositeSimilarity {
    let keys: Vec<String> = (0..NUM_PROPERTIES)
        .map(|index| format!("property-{}", index))
        .collect();
    CompositeSimilarity::new(vec![
        WeightedSignal::new("similarity_1", 30.0, random_symmetric_matrix(&keys)),
        WeightedSignal::new("similarity_2", 20.0, random_symmetric_matrix(&keys)),
        WeightedSignal::new("similarity_3", 8.0, random_symmetric_matrix(&keys)),
    ])
    .unwrap()
}

fn bench_recommend_top_5(bench: &mut Bencher) {
    let composite = composite();
    let catalog = PropertyCatalog::new();
    bench.iter(|| {
        bencher::black_box(recommend(&composite, &catalog, "property-1000", 5).unwrap());
    });
}

fn bench_recommend_all(bench: &mut Bencher) {
    let composite = composite();
    let catalog = PropertyCatalog::new();
    bench.iter(|| {
        bencher::black_box(
            recommend(&composite, &catalog, "property-1000", NUM_PROPERTIES).unwrap(),
        );
    });
}
