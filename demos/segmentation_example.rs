use custseg::filter::high_value_filter;
use custseg::metrics::cluster_sizes;
use custseg::report::{hover_text, summarize};
use custseg::{
    AGE, ClusterError, INCOME, KMeans, Labels, Matrix, PeopleConfig, cluster_filtered,
    generate_people, kmeans, select_columns,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Customer Segmentation with K-Means ===\n");

    let people = generate_people(&PeopleConfig::default().num_samples(2_000).seed(7))?;
    println!("Dataset: {} people, {} features", people.nrows(), people.ncols());
    println!("First person: {}\n", hover_text(&people.row(0))?);

    // Age vs income, compared over several k
    let age_income = select_columns(&people, &[AGE, INCOME])?;
    for &k in &[2, 3, 4, 5] {
        match test_kmeans(&age_income, k) {
            Ok(result) => println!("{}", result),
            Err(e) => println!("K-Means(k={}) failed: {}", k, e),
        }
    }

    println!("\n=== High-Value Young Adults ===");
    let filter = high_value_filter((25.0, 35.0), 100_000.0, 80.0);
    match cluster_filtered(&people, &filter, 3, 100, 42) {
        Ok((filtered, labels, centers)) => {
            println!("{} people matched", filtered.nrows());
            print!("{}", summarize(&filtered, &labels, &centers)?);
            print_cluster_summary(&labels, centers.nrows());
        }
        Err(ClusterError::EmptyInput) => println!("No people found with the specified criteria."),
        Err(e) => println!("Clustering failed: {}", e),
    }

    println!("\n=== Reproducibility ===");
    let (labels_a, centers_a) = kmeans(&age_income, 3, 100, 42)?;
    let (labels_b, centers_b) = kmeans(&age_income, 3, 100, 42)?;
    println!(
        "Same seed, same result: {}",
        labels_a == labels_b && centers_a == centers_b
    );

    Ok(())
}

fn test_kmeans(x: &Matrix, k: usize) -> Result<String, ClusterError> {
    let mut model = KMeans::new(k).max_iter(100).random_state(42);
    let labels = model.fit_predict(x)?;

    let non_empty = cluster_sizes(&labels, k).iter().filter(|&&n| n > 0).count();
    Ok(format!(
        "K-Means(k={}): {} non-empty clusters, Inertia: {:.4}, {} iterations",
        k,
        non_empty,
        model.inertia.unwrap_or_default(),
        model.n_iter.unwrap_or_default()
    ))
}

fn print_cluster_summary(labels: &Labels, k: usize) {
    for (cluster, size) in cluster_sizes(labels, k).into_iter().enumerate() {
        println!("    Cluster {}: {} points", cluster, size);
    }
}
