/// A host-resident view over one named model parameter.
///
/// The gradient is `None` until a backward pass has populated it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedParam<'a> {
    pub name: &'a str,
    pub value: &'a [f32],
    pub grad: Option<&'a [f32]>,
}

impl<'a> NamedParam<'a> {
    /// Creates a new `NamedParam` carrying both values and gradient.
    ///
    /// # Arguments
    /// * `name` - The parameter's name, used to build its tags.
    /// * `value` - The parameter's current values.
    /// * `grad` - The parameter's gradient.
    pub fn new(name: &'a str, value: &'a [f32], grad: &'a [f32]) -> Self {
        Self {
            name,
            value,
            grad: Some(grad),
        }
    }

    /// Creates a new `NamedParam` whose gradient hasn't been computed yet.
    pub fn without_grad(name: &'a str, value: &'a [f32]) -> Self {
        Self {
            name,
            value,
            grad: None,
        }
    }
}

/// Something that can enumerate its parameters by name.
///
/// Implementors are responsible for materializing their tensors into host
/// memory and for keeping the order stable between calls.
pub trait NamedParameters {
    /// Returns every parameter of the model, in order.
    fn named_parameters(&self) -> Vec<NamedParam<'_>>;
}

impl NamedParameters for [NamedParam<'_>] {
    fn named_parameters(&self) -> Vec<NamedParam<'_>> {
        self.to_vec()
    }
}

impl<const N: usize> NamedParameters for [NamedParam<'_>; N] {
    fn named_parameters(&self) -> Vec<NamedParam<'_>> {
        self.to_vec()
    }
}

impl NamedParameters for Vec<NamedParam<'_>> {
    fn named_parameters(&self) -> Vec<NamedParam<'_>> {
        self.clone()
    }
}
