use catalog::{ContentStore, ContentType};
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("demos/seed");

    println!("Loading catalog seed data...\n");

    let start = Instant::now();
    let store = ContentStore::load_from_dir(data_dir).expect("Failed to load seed data");
    let elapsed = start.elapsed();

    let (items, users, ratings) = store.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    for content_type in ContentType::ALL {
        println!(
            "{}: {}",
            content_type.collection_name(),
            store.item_count(content_type)
        );
    }
    println!("Items: {}", items);
    println!("Users: {}", users);
    println!("Ratings: {}", ratings);
}
