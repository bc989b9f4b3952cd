//! Basic example demonstrating the Write.as API client.
//!
//! Run with:
//! ```
//! WRITEAS_API_URL=https://development.write.as/api cargo run --example basic -- demo demo
//! ```

use writeas::{
    get_collection_posts, get_user_collections, Collection, Create, Delete, Get, Post,
    PostParams, WriteAsClient,
};

#[tokio::main]
async fn main() -> writeas::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating Write.as client...");
    let mut client = WriteAsClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Publish and remove an anonymous post
    println!("\n--- Anonymous Post ---");
    let post = Post::create(
        &client,
        PostParams::new("Hello from the Rust client.").with_title("Hello"),
    )
    .await?;
    println!("Published {} (edit token held: {})", post.id, post.token.is_some());

    let fetched = Post::get(&client, post.id.clone()).await?;
    println!("  Title: {}", fetched.title);
    println!("  Body: {}", fetched.content);

    Post::delete(&client, post.owned_params()).await?;
    println!("Deleted {}", post.id);

    // Log in if credentials were given
    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        println!("\nPass a username and password to list your blogs.");
        return Ok(());
    };

    println!("\n--- Logging In ---");
    let auth = client.log_in(&username, &password).await?;
    println!("Logged in as {}", auth.user.username);

    let collections = get_user_collections(&client).await?;
    println!("Found {} collections", collections.len());

    for summary in collections.iter().take(5) {
        let collection = Collection::get(&client, summary.alias.clone()).await?;
        println!(
            "  - {} ({}): {} posts",
            collection.title, collection.alias, collection.total_posts
        );

        let posts = get_collection_posts(&client, &collection.alias).await?;
        for post in posts.iter().take(3) {
            println!(
                "      {} {}",
                post.slug.as_deref().unwrap_or("-"),
                post.title
            );
        }
    }

    client.log_out().await?;
    println!("\nLogged out.");

    Ok(())
}
