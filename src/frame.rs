use crate::observation::Observation;

/// One frame's worth of tracker output.
pub struct Frame {
    pub observations: Vec<Observation>,
}

impl Frame {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
