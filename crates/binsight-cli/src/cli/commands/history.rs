//! History command handlers.

use std::io::{self, BufRead, Write};

use anyhow::{Result, anyhow, bail};
use binsight_core::api::ApiClient;
use binsight_core::credentials::CredentialStore;
use binsight_core::materials::Material;
use comfy_table::Table;

pub async fn list(server_url: &str) -> Result<()> {
    let token = require_token()?;
    let api = ApiClient::new(server_url);
    let records = api
        .history(&token)
        .await
        .map_err(|err| anyhow!("failed to fetch history: {err}"))?;

    if records.is_empty() {
        println!("No classifications yet.");
        println!("Run `binsight classify <image>` to upload your first photo.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(["ID", "Material", "Date", "Image"]);
    for record in &records {
        let material = Material::from_label(&record.prediction);
        table.add_row([
            record.id.to_string(),
            format!("{} {}", material.icon(), material.title()),
            record.formatted_date(),
            format!("{} KiB inline", record.image_base64.len() / 1024),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn delete(server_url: &str, id: i64, yes: bool) -> Result<()> {
    let token = require_token()?;

    if !yes && !confirm(id)? {
        println!("Cancelled.");
        return Ok(());
    }

    let api = ApiClient::new(server_url);
    api.delete_record(&token, id)
        .await
        .map_err(|err| anyhow!("failed to delete record {id}: {err}"))?;
    println!("Record deleted successfully");
    Ok(())
}

fn require_token() -> Result<String> {
    match CredentialStore::open_default().token()? {
        Some(token) => Ok(token),
        None => bail!("not signed in; run `binsight login` first"),
    }
}

fn confirm(id: i64) -> Result<bool> {
    println!("This will permanently delete record {id} from your history.");
    print!("Are you sure? [y/N] ");
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().lock().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}
