use serde::{Deserialize, Serialize};

/// Surface material of a [`Shape`](crate::core::scene::Shape).
/// The defaults follow the VRML97 `Material` node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    ambient_intensity: f32,
    diffuse_color: [f32; 3],
    emissive_color: [f32; 3],
    shininess: f32,
    specular_color: [f32; 3],
    transparency: f32,
}

impl Material {
    pub fn new() -> Self {
        Self {
            ambient_intensity: 0.2,
            diffuse_color: [0.8, 0.8, 0.8],
            emissive_color: [0.0, 0.0, 0.0],
            shininess: 0.2,
            specular_color: [0.0, 0.0, 0.0],
            transparency: 0.0,
        }
    }

    pub fn get_ambient_intensity(&self) -> f32 {
        self.ambient_intensity
    }

    pub fn set_ambient_intensity(&mut self, value: f32) {
        self.ambient_intensity = value.clamp(0.0, 1.0);
    }

    pub fn get_diffuse_color(&self) -> [f32; 3] {
        self.diffuse_color
    }

    pub fn set_diffuse_color(&mut self, color: [f32; 3]) {
        self.diffuse_color = color.map(|c| c.clamp(0.0, 1.0));
    }

    pub fn get_emissive_color(&self) -> [f32; 3] {
        self.emissive_color
    }

    pub fn set_emissive_color(&mut self, color: [f32; 3]) {
        self.emissive_color = color.map(|c| c.clamp(0.0, 1.0));
    }

    pub fn get_shininess(&self) -> f32 {
        self.shininess
    }

    pub fn set_shininess(&mut self, value: f32) {
        self.shininess = value.clamp(0.0, 1.0);
    }

    pub fn get_specular_color(&self) -> [f32; 3] {
        self.specular_color
    }

    pub fn set_specular_color(&mut self, color: [f32; 3]) {
        self.specular_color = color.map(|c| c.clamp(0.0, 1.0));
    }

    pub fn get_transparency(&self) -> f32 {
        self.transparency
    }

    pub fn set_transparency(&mut self, value: f32) {
        self.transparency = value.clamp(0.0, 1.0);
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let mat = Material::default();
        assert_eq!(mat.get_ambient_intensity(), 0.2);
        assert_eq!(mat.get_diffuse_color(), [0.8, 0.8, 0.8]);
        assert_eq!(mat.get_emissive_color(), [0.0, 0.0, 0.0]);
        assert_eq!(mat.get_shininess(), 0.2);
        assert_eq!(mat.get_specular_color(), [0.0, 0.0, 0.0]);
        assert_eq!(mat.get_transparency(), 0.0);
    }

    #[test]
    fn setters_clamp_to_unit_range() {
        let mut mat = Material::new();
        mat.set_ambient_intensity(-1.0);
        mat.set_diffuse_color([1.5, -0.5, 0.25]);
        mat.set_emissive_color([0.5, 3.0, 0.0]);
        mat.set_shininess(0.75);
        mat.set_specular_color([-2.0, 0.125, 1.0]);
        mat.set_transparency(2.0);
        assert_eq!(mat.get_ambient_intensity(), 0.0);
        assert_eq!(mat.get_diffuse_color(), [1.0, 0.0, 0.25]);
        assert_eq!(mat.get_emissive_color(), [0.5, 1.0, 0.0]);
        assert_eq!(mat.get_shininess(), 0.75);
        assert_eq!(mat.get_specular_color(), [0.0, 0.125, 1.0]);
        assert_eq!(mat.get_transparency(), 1.0);
    }
}
