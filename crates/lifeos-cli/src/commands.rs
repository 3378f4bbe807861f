use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::cli::Commands;
use lifeos_core::{MetricsSummary, Skill, TaskDoc};
use lifeos_store::LifeOsClient;

pub async fn execute(command: Commands, client: &LifeOsClient) -> Result<()> {
    match command {
        Commands::Metrics { json } => {
            let metrics = client.compute_metrics().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                print_snapshot(&metrics);
            }
        }

        Commands::Tasks { limit, all } => {
            let tasks = if all {
                client.get_tasks(limit).await?
            } else {
                client.get_unanalyzed_tasks(limit).await?
            };
            let label = if all { "Tasks" } else { "Unanalyzed tasks" };
            println!("{}: {}", label, tasks.len());
            for task in tasks {
                println!(
                    "  {} [{}] {} (complexity {}, potential {})",
                    task.task_id,
                    task.domain.as_deref().unwrap_or("-"),
                    task.title,
                    task.complexity_score,
                    task.skill_potential
                );
            }
        }

        Commands::Skills => {
            let skills = client.get_all_skills().await?;
            println!("Active skills: {}", skills.len());
            for skill in skills {
                println!(
                    "  {} v{} [{}] uses: {}, success: {:.0}%",
                    skill.name.as_deref().unwrap_or("(unnamed)"),
                    skill.version,
                    skill.domain.as_deref().unwrap_or("-"),
                    skill.total_uses,
                    skill.success_rate * 100.0
                );
            }
        }

        Commands::SaveTask { file } => {
            let task: TaskDoc = read_json(&file)?;
            client.save_task(&task).await?;
            println!("✓ Task saved: {}", task.task_id);
        }

        Commands::SaveSkill { file } => {
            let skill: Skill = read_json(&file)?;
            client.save_skill(&skill).await?;
            println!("✓ Skill saved: {} ({})", skill.name, skill.skill_id);
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn print_snapshot(metrics: &MetricsSummary) {
    println!("✅ Life OS AI Skills System Connected!");
    println!("   Skills: {}", metrics.total_skills);
    println!("   Tasks: {}", metrics.tasks_documented);
    println!("   Time Saved: {:.1}h", metrics.total_time_saved_hours);
    println!(
        "   ADHD Effectiveness: {:.0}%",
        metrics.avg_adhd_effectiveness * 100.0
    );
    if !metrics.skills_by_domain.is_empty() {
        println!("   By domain:");
        for (domain, count) in &metrics.skills_by_domain {
            println!("     {}: {}", domain, count);
        }
    }
}
