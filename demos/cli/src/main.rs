use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use triage_core::{
    Assessment, PatientDemographics, SessionLog, TriageConfig, DISCLAIMER, GREETING,
};

#[derive(Parser, Debug)]
#[command(
    name = "triage-cli",
    about = "Evalúa narrativas clínicas: temperatura, síntomas, urgencia y recomendaciones."
)]
struct Args {
    /// Fichero JSON con umbrales que sustituyen a los predeterminados.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evalúa una única narrativa.
    Assess {
        /// Narrativa escrita directamente.
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,
        /// Fichero de texto con la narrativa.
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Imprime la evaluación como JSON.
        #[arg(long)]
        json: bool,
    },
    /// Sesión interactiva: cada línea de la entrada estándar es una narrativa.
    Session {
        /// Guarda el historial de la sesión como JSON al salir.
        #[arg(long)]
        export: Option<PathBuf>,
        /// Nombre del paciente para los registros.
        #[arg(long)]
        patient_name: Option<String>,
        /// Edad del paciente para los registros.
        #[arg(long)]
        patient_age: Option<u32>,
    },
}

#[derive(Debug, PartialEq)]
enum SessionCommand<'a> {
    Summary,
    History,
    Clear,
    Quit,
    Narrative(&'a str),
    Empty,
}

impl<'a> SessionCommand<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => SessionCommand::Empty,
            ":resumen" => SessionCommand::Summary,
            ":historial" => SessionCommand::History,
            ":limpiar" => SessionCommand::Clear,
            ":salir" => SessionCommand::Quit,
            text => SessionCommand::Narrative(text),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Assess { text, input, json } => {
            let narrative = match (text, input) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("No se pudo leer el fichero {path:?}"))?,
                (None, None) => anyhow::bail!("Indica --text o --input"),
            };

            let assessment = triage_rules::assess(narrative.trim(), &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("{}", render_assessment(&assessment));
                println!("{DISCLAIMER}");
            }
        }
        Command::Session {
            export,
            patient_name,
            patient_age,
        } => {
            let demographics = (patient_name.is_some() || patient_age.is_some()).then(|| {
                PatientDemographics {
                    name: patient_name,
                    age: patient_age,
                    sex: None,
                }
            });
            let log = run_session(&config, demographics, io::stdin().lock(), io::stdout())?;
            if let Some(path) = export {
                let data = export_session(&log)?;
                std::fs::write(&path, data)
                    .with_context(|| format!("No se pudo escribir el fichero {path:?}"))?;
                tracing::info!(records = log.len(), path = %path.display(), "session exported");
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<TriageConfig> {
    let Some(path) = path else {
        return Ok(TriageConfig::default());
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("No se pudo leer la configuración {path:?}"))?;
    let config = triage_rules::parse_config(&data)
        .with_context(|| format!("Configuración no válida en {path:?}"))?;
    Ok(config)
}

fn export_session(log: &SessionLog) -> anyhow::Result<String> {
    serde_json::to_string_pretty(log).context("No se pudo serializar la sesión")
}

fn run_session(
    config: &TriageConfig,
    demographics: Option<PatientDemographics>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<SessionLog> {
    let mut log = SessionLog::new();

    writeln!(output, "{GREETING}")?;
    writeln!(output, "Comandos: :resumen, :historial, :limpiar, :salir")?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match SessionCommand::parse(&line) {
            SessionCommand::Empty => continue,
            SessionCommand::Quit => break,
            SessionCommand::Summary => {
                let summary = log.summarize();
                writeln!(
                    output,
                    "Registros: {} | Críticos: {} | Altos: {}",
                    summary.total, summary.critical, summary.high
                )?;
            }
            SessionCommand::History => {
                if log.is_empty() {
                    writeln!(output, "Aún no hay evaluaciones en esta sesión.")?;
                }
                for (index, record) in log.records().iter().enumerate() {
                    writeln!(
                        output,
                        "{}. [{}] {} | {} | {}",
                        index + 1,
                        record.recorded_at.format("%H:%M:%S"),
                        record.urgency.label(),
                        record
                            .diagnosis
                            .map(|d| d.label())
                            .unwrap_or("Sin diagnóstico"),
                        record.narrative
                    )?;
                }
            }
            SessionCommand::Clear => {
                log.clear();
                writeln!(output, "Sesión vaciada.")?;
            }
            SessionCommand::Narrative(text) => {
                let assessment = triage_rules::assess(text, config)?;
                writeln!(output, "{}", render_assessment(&assessment))?;
                log.record(
                    assessment.triage,
                    text,
                    &assessment.extraction,
                    demographics.clone(),
                );
            }
        }
    }

    writeln!(output, "{DISCLAIMER}")?;
    Ok(log)
}

fn render_assessment(assessment: &Assessment) -> String {
    if assessment.is_insufficient() {
        return "Información insuficiente: no se detectó temperatura ni síntomas reconocidos."
            .to_string();
    }

    let triage = &assessment.triage;
    let extraction = &assessment.extraction;
    let mut lines = vec![
        format!("Urgencia: {}", triage.urgency.label()),
        format!(
            "Diagnóstico probable: {}",
            triage.diagnosis.map(|d| d.label()).unwrap_or("ninguno")
        ),
    ];

    if let Some(value) = extraction.temperature {
        let mut line = match &assessment.temperature_band {
            Some(band) => format!("Temperatura: {value:.1} °C ({band})"),
            None => format!("Temperatura: {value:.1} °C"),
        };
        if assessment.temperature_outside_normal == Some(true) {
            line.push_str(", fuera del rango normal");
        }
        lines.push(line);
    }

    if !extraction.symptoms.is_empty() {
        let labels: Vec<&str> = extraction.symptoms.iter().map(|s| s.label()).collect();
        lines.push(format!("Síntomas: {}", labels.join(", ")));
    }

    if !triage.recommendations.is_empty() {
        lines.push("Recomendaciones:".to_string());
        lines.extend(
            triage
                .recommendations
                .iter()
                .enumerate()
                .map(|(index, line)| format!("  {}. {line}", index + 1)),
        );
    }

    if !triage.codes.is_empty() {
        lines.push(format!("Códigos: {}", triage.codes.join("; ")));
    }

    lines.join("\n")
}
