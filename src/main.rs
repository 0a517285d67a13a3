mod linear;

use std::{env, fs::File, io::BufWriter, str::FromStr};

use anyhow::{bail, ensure, Context};
use log::info;

use linear::{Linear, Split};
use train_summary::{
    record_training, record_validation, JsonLinesSink, SummarySink, TensorBoardSink,
};

const DEFAULT_BACKEND: &str = "tensorboard";
const DEFAULT_LOGDIR: &str = "runs";
const DEFAULT_JSONL_PATH: &str = "summary.jsonl";
const DEFAULT_STEPS: u64 = 100;
const DEFAULT_VALIDATE_EVERY: u64 = 10;

const TRAIN_SAMPLES: usize = 64;
const VALIDATION_SAMPLES: usize = 16;
const LEARNING_RATE: f32 = 0.1;

/// Reads `key` from the environment, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) => v.parse().with_context(|| format!("invalid {key}: {v:?}")),
        Err(_) => Ok(default),
    }
}

/// Opens the sink named by `backend` at `path`.
fn open_sink(backend: &str, path: Option<String>) -> anyhow::Result<Box<dyn SummarySink>> {
    match backend {
        "tensorboard" => {
            let logdir = path.unwrap_or_else(|| DEFAULT_LOGDIR.to_string());
            let sink = TensorBoardSink::new(&logdir)
                .with_context(|| format!("failed to create {logdir}"))?;
            info!("writing tensorboard events under {logdir}");
            Ok(Box::new(sink))
        }
        "jsonl" => {
            let path = path.unwrap_or_else(|| DEFAULT_JSONL_PATH.to_string());
            let file = File::create(&path).with_context(|| format!("failed to create {path}"))?;
            info!("writing json lines to {path}");
            Ok(Box::new(JsonLinesSink::new(BufWriter::new(file))))
        }
        other => bail!("unknown SUMMARY_BACKEND {other:?}, expected tensorboard or jsonl"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let backend = env::var("SUMMARY_BACKEND").unwrap_or_else(|_| DEFAULT_BACKEND.to_string());
    let path = env::var("SUMMARY_PATH").ok();
    let steps: u64 = env_or("STEPS", DEFAULT_STEPS)?;
    let validate_every: u64 = env_or("VALIDATE_EVERY", DEFAULT_VALIDATE_EVERY)?;
    ensure!(validate_every > 0, "VALIDATE_EVERY must be positive");

    let mut sink = open_sink(&backend, path)?;

    let train = Split::synthetic(0, TRAIN_SAMPLES);
    let validation = Split::synthetic(TRAIN_SAMPLES, VALIDATION_SAMPLES);
    let mut model = Linear::new(2);

    for step in 0..steps {
        let loss = model.backward(&train);
        record_training(&mut sink, &model, loss, step)?;
        model.step(LEARNING_RATE);

        if (step + 1) % validate_every == 0 {
            let (loss, accuracy) = model.evaluate(&validation);
            record_validation(&mut sink, loss, accuracy, step)?;
            info!("step {step}: validation loss {loss}, accuracy {accuracy}");
        }
    }

    sink.flush()?;
    info!("wrapping up after {steps} steps");
    Ok(())
}
