use kilnview_client::{ApiClient, DEFAULT_LIMIT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = ApiClient::from_env().map_err(anyhow::Error::msg)?;

    let kpis = client.kpis().await?;
    for (name, metric) in &kpis.metrics {
        println!(
            "{name:<24} {:>10.2} / {:>10.2} {}",
            metric.current,
            metric.target.unwrap_or_default(),
            metric.unit.as_deref().unwrap_or("")
        );
    }

    let kiln = client.kiln_operations(DEFAULT_LIMIT).await?;
    for record in kiln.iter().take(5) {
        println!(
            "#{:<3} {:<10} temperature={:?}",
            record.id,
            record.location.as_deref().unwrap_or("-"),
            record.get_f64("temperature").or(record.get_f64("burning_zone_temp_c"))
        );
    }

    let plants = client.plant_locations().await?;
    for plant in plants {
        println!("{} ({}, {})", plant.plant_name, plant.latitude, plant.longitude);
    }

    let reply = client
        .send_chat_message("How can we raise the thermal substitution rate?", &[])
        .await?;
    println!("assistant: {}", reply.message);
    for recommendation in reply.recommendations {
        println!("  - {recommendation}");
    }

    Ok(())
}
