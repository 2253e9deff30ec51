//! Classify command: submit a waste photo and render disposal guidance.

use std::path::Path;

use anyhow::{Result, anyhow, bail};
use binsight_core::api::ApiClient;
use binsight_core::credentials::CredentialStore;
use binsight_core::materials::{self, Material};
use binsight_core::images;

pub async fn run(server_url: &str, image: &Path) -> Result<()> {
    let store = CredentialStore::open_default();
    let Some(token) = store.token()? else {
        bail!("not signed in; run `binsight login` first");
    };

    let data_uri = images::encode_data_uri(image)?;

    println!("Uploading {}...", image.display());
    let api = ApiClient::new(server_url);
    let label = api
        .classify(&token, &data_uri)
        .await
        .map_err(|err| anyhow!("classification failed: {err}"))?;

    println!();
    render_material(Material::from_label(&label), true);
    Ok(())
}

/// The result screen reached without a new photo: guidance by label.
pub fn guide(material: Option<&str>) {
    match material {
        Some(label) => render_material(Material::from_label(label), false),
        None => {
            println!("Recognized materials:");
            for material in materials::ALL {
                println!(
                    "  {} {:<13} {}",
                    material.icon(),
                    material.title(),
                    material.description()
                );
            }
        }
    }
}

fn render_material(material: Material, detected: bool) {
    if detected {
        println!("{} {} Detected", material.icon(), material.title());
    } else {
        println!("{} {}", material.icon(), material.title());
    }
    println!();
    println!("{}", material.description());
    println!();
    println!("Disposal instructions:");
    for (index, step) in material.instructions().iter().enumerate() {
        println!("  {}. {step}", index + 1);
    }
}
