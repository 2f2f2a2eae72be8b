//! Lineage - headless pipeline driver
//!
//! Exercises the whole stack without a window: seeds a session, applies
//! a scripted set of edits, renders, and writes the scene to stdout as
//! JSON. Useful for eyeballing the pipeline and as a fixture generator.

use anyhow::Context;
use edit_engine::FieldPatch;
use family_model::PersonId;
use render_model::Viewport;
use session::TreeSession;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("starting lineage demo session");

    let mut session = TreeSession::new(Viewport::new(1280.0, 800.0));

    // Scripted walk through the editing surface: give Arthur a spouse,
    // expand her branch, and polish a couple of fields.
    let arthur = PersonId::new("p2");
    session.add_spouse(&arthur)?;
    let spouse_id = session
        .tree()
        .find(&arthur)
        .and_then(|member| member.spouse.as_ref())
        .map(|spouse| spouse.id.clone())
        .context("Arthur should have a spouse after add_spouse")?;
    session.toggle_spouse(&spouse_id);
    session.on_save(
        &spouse_id,
        FieldPatch::default().name("Moira Legacy").year("1930"),
    )?;
    session.add_ancestor(&spouse_id)?;

    let snapshot = session
        .editor_snapshot(&arthur)
        .context("Arthur still exists")?;
    tracing::info!(
        name = %snapshot.name,
        can_delete = snapshot.can_delete,
        "editor snapshot for the spoused node"
    );

    let scene = session.render();
    tracing::info!(
        nodes = session.tree().len(),
        items = scene.items.len(),
        "rendered scene"
    );

    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}
