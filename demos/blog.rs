//! Blog Example - Nested components through a collection slot
//!
//! This example demonstrates:
//! - Declaring classes with params, options and slots
//! - A collection slot holding nested components (`articles` / `article`)
//! - Function slots that only keep their content block
//! - The populate phase running before each component's `call`
//!
//! Run with: cargo run --example blog
//! Lifecycle logs: RUST_LOG=spark_slots=trace cargo run --example blog

use std::error::Error;

use spark_slots::{Args, ComponentClass, Field, Namespace, Renderable, version};
use tracing_subscriber::EnvFilter;

type Page = Vec<String>;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    println!("=== spark-slots {} Blog Example ===\n", version::string());

    let namespace = Namespace::<Page>::new("Blog");

    // Blog references Article by name before Article is declared
    let blog = ComponentClass::<Page>::builder("BlogComponent")
        .namespace(&namespace)
        .param("heading")
        .renders_many("articles", "ArticleComponent")
        .call(|this, page: &mut Page| {
            let heading = this.attributes().str("heading").unwrap_or_default().to_string();
            page.push(format!("<blog title=\"{heading}\">"));
            this.draw_slot("articles", page)?;
            page.push("</blog>".into());
            Ok(())
        })
        .build()?;

    ComponentClass::<Page>::builder("ArticleComponent")
        .namespace(&namespace)
        .option(Field::new("featured").with_default(false))
        .renders_one("title", Renderable::<Page>::function(|_, _, _, _| Ok(None)))
        .renders_one("body", ())
        .call(|this, page: &mut Page| {
            let featured = if this.attributes().flag("featured") { " featured" } else { "" };
            page.push(format!("  <article{featured}>"));
            page.push("    <title>".into());
            this.draw_slot("title", page)?;
            page.push("    </title>".into());
            this.draw_slot("body", page)?;
            page.push("  </article>".into());
            Ok(())
        })
        .build()?;

    let mut page = Page::new();
    ComponentClass::render(&blog, Args::new().arg("Notes"), &mut page, |blog, page| {
        page.push("Welcome to my Blog".into());

        blog.nest("article", Args::new(), page, |article, page| {
            article.content("title", page, |page: &mut Page| {
                page.push("      Slots".into());
                Ok(())
            })?;
            article.content("body", page, |page: &mut Page| {
                page.push("    <p>Declared once, filled per render.</p>".into());
                Ok(())
            })
        })?;

        blog.nest("article", Args::new().with("featured", true), page, |article, page| {
            article.content("title", page, |page: &mut Page| {
                page.push("      Lifecycles".into());
                Ok(())
            })
        })
    })?;

    for line in &page {
        println!("{line}");
    }

    println!("\nRegistered classes: {:?}", namespace.names());
    Ok(())
}
