use mesh_nn::{NetworkMesh, Sample, SgdConfig, Target};
use ndarray::array;

fn main() {
    env_logger::init();

    let train_data: Vec<Sample> = vec![
        (array![0.0, 0.0], Target::Dense(array![1.0, 0.0])),
        (array![0.0, 1.0], Target::Dense(array![0.0, 1.0])),
        (array![1.0, 0.0], Target::Dense(array![0.0, 1.0])),
        (array![1.0, 1.0], Target::Dense(array![1.0, 0.0])),
    ];

    let mut mesh = NetworkMesh::with_layers(&[2, 5, 2], Some(100));
    let config = SgdConfig::new(2000, 4, 3.0);

    let history = mesh
        .sgd(&train_data, &config, Some(&train_data))
        .expect("mesh was built with an architecture");

    if let Some(last) = history.last() {
        println!(
            "after {} epochs: train loss {:.6}, accuracy {:.0}%",
            last.total_epochs,
            last.train_loss,
            last.test_accuracy.unwrap_or(0.0) * 100.0
        );
    }

    for (input, _) in &train_data {
        let output = mesh.predict(input).expect("mesh is trained");
        println!("{} -> {:.4}", input, output);
    }
}
