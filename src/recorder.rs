use log::{debug, warn};

use crate::{
    error::{Result, SummaryErr},
    param::NamedParameters,
    sink::SummarySink,
};

pub const TRAIN_LOSS_TAG: &str = "train loss";
pub const VALIDATION_LOSS_TAG: &str = "validation loss";
pub const VALIDATION_ACCURACY_TAG: &str = "validation accuracy";

/// Returns the tag a parameter's values are recorded under.
pub fn param_tag(name: &str) -> String {
    format!("trainable parameter {name}")
}

/// Returns the tag a parameter's gradient is recorded under.
pub fn grad_tag(name: &str) -> String {
    format!("gradient of trainable parameter {name}")
}

/// Records the state of a training step.
///
/// Emits the loss as a scalar, then for every parameter, in order, a histogram of its values
/// followed by a histogram of its gradient. All records are emitted at `step`.
///
/// # Arguments
/// * `sink` - Where the records are written to.
/// * `params` - The model's parameters, already in host memory.
/// * `loss` - The step's loss.
/// * `step` - The position of the records on the training time axis.
///
/// # Errors
/// - `SummaryErr::MissingGradient` if a parameter has no gradient. Its values histogram, and
///   everything before it, has already been written by then.
/// - `SummaryErr::Sink` if any write fails, nothing else is written after it.
pub fn record_training<S, P>(sink: &mut S, params: &P, loss: f32, step: u64) -> Result<()>
where
    S: SummarySink + ?Sized,
    P: NamedParameters + ?Sized,
{
    sink.add_scalar(TRAIN_LOSS_TAG, loss, step)?;

    let params = params.named_parameters();
    for param in &params {
        sink.add_histogram(&param_tag(param.name), param.value, step)?;

        let Some(grad) = param.grad else {
            warn!("parameter {} has no gradient at step {step}", param.name);
            return Err(SummaryErr::MissingGradient {
                name: param.name.to_string(),
                step,
            });
        };

        sink.add_histogram(&grad_tag(param.name), grad, step)?;
    }

    debug!(
        "recorded training summary at step {step}: loss {loss}, {} parameters",
        params.len()
    );
    Ok(())
}

/// Records the outcome of a validation pass.
///
/// Emits the loss and then the accuracy, both as scalars at `step`.
///
/// # Errors
/// `SummaryErr::Sink` if any write fails.
pub fn record_validation<S>(sink: &mut S, loss: f32, accuracy: f32, step: u64) -> Result<()>
where
    S: SummarySink + ?Sized,
{
    sink.add_scalar(VALIDATION_LOSS_TAG, loss, step)?;
    sink.add_scalar(VALIDATION_ACCURACY_TAG, accuracy, step)?;

    debug!("recorded validation summary at step {step}: loss {loss}, accuracy {accuracy}");
    Ok(())
}
