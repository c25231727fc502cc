use crate::layer::Layer;

/// A gradient-descent update rule applied to a layer's parameters.
///
/// Frozen parameters are skipped, but still occupy state slots, so
/// state never misaligns when trainability flags differ between
/// otherwise identical layers.
pub trait Optimiser {
    fn update(&mut self, layer: &mut dyn Layer, gradient_factor: f32, learning_rate: f32);
}

pub struct Adam {
    momentum: Vec<f32>,
    velocity: Vec<f32>,
}

impl Adam {
    const B1: f32 = 0.9;
    const B2: f32 = 0.999;

    pub fn new(layer: &dyn Layer) -> Self {
        let size = layer.parameters().iter().map(|param| param.size()).sum();
        Self { momentum: vec![0.0; size], velocity: vec![0.0; size] }
    }

    fn update_single(&mut self, i: usize, param: &mut f32, grad: f32, rate: f32) {
        self.momentum[i] = Self::B1 * self.momentum[i] + (1. - Self::B1) * grad;
        self.velocity[i] = Self::B2 * self.velocity[i] + (1. - Self::B2) * grad * grad;
        *param -= rate * self.momentum[i] / (self.velocity[i].sqrt() + 0.000_000_01);
    }
}

impl Optimiser for Adam {
    fn update(&mut self, layer: &mut dyn Layer, gradient_factor: f32, learning_rate: f32) {
        let mut i = 0;

        for tensor in layer.parameters_mut() {
            match tensor.gradients.as_ref() {
                Some(grads) => {
                    for (param, &grad) in tensor.values.values_mut().iter_mut().zip(grads.values())
                    {
                        self.update_single(i, param, gradient_factor * grad, learning_rate);
                        i += 1;
                    }
                }
                None => i += tensor.size(),
            }
        }
    }
}

pub struct AdamW {
    adam: Adam,
    decay: f32,
}

impl AdamW {
    pub fn new(layer: &dyn Layer) -> Self {
        Self::with_decay(layer, 0.01)
    }

    pub fn with_decay(layer: &dyn Layer, decay: f32) -> Self {
        Self { adam: Adam::new(layer), decay }
    }
}

impl Optimiser for AdamW {
    fn update(&mut self, layer: &mut dyn Layer, gradient_factor: f32, learning_rate: f32) {
        let decay = 1.0 - self.decay * learning_rate;
        let mut i = 0;

        for tensor in layer.parameters_mut() {
            match tensor.gradients.as_ref() {
                Some(grads) => {
                    for (param, &grad) in tensor.values.values_mut().iter_mut().zip(grads.values())
                    {
                        *param *= decay;
                        self.adam.update_single(i, param, gradient_factor * grad, learning_rate);
                        i += 1;
                    }
                }
                None => i += tensor.size(),
            }
        }
    }
}
