//! SceneBuilder - builds the backdrop, cake, and heart scenes
//!
//! Runs once at startup. Every scene gets the same light recipe; the
//! geometry and palette constants are the card's fixed design.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use keepsake_math::{PathOutline, Vec3};
use keepsake_scene::{
    CakeRig, CardRig, Material, MeshShape, Node, NodeKey, PerspectiveCamera, PointCloud, Scene,
    SceneStage,
};

use crate::config::{BackdropConfig, CameraConfig};

/// Cake tier radii, heights, resting y positions, and colors
const TIERS: [(f32, f32, f32, u32); 3] = [
    (1.5, 0.8, -0.4, 0xfff0f3),
    (1.1, 0.7, 0.35, 0xffb3c1),
    (0.7, 0.6, 1.0, 0xff4d6d),
];

const CANDLE_Y: f32 = 1.5;
const FLAME_Y: f32 = 1.75;
const HEART_COLOR: u32 = 0xff4d6d;
const HEART_SCALE: f32 = 0.8;

/// Builder for the card's three scenes
pub struct SceneBuilder {
    camera: CameraConfig,
    backdrop: BackdropConfig,
    rng: StdRng,
}

impl SceneBuilder {
    /// Create a builder with entropy-seeded particle placement
    pub fn new(camera: CameraConfig, backdrop: BackdropConfig) -> Self {
        Self {
            camera,
            backdrop,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a builder with a fixed seed, for deterministic tests
    pub fn with_seed(camera: CameraConfig, backdrop: BackdropConfig, seed: u64) -> Self {
        Self {
            camera,
            backdrop,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build the three scenes and the rig of animatable node handles
    pub fn build(mut self) -> (SceneStage, CardRig) {
        let (backdrop_scene, particles) = self.build_backdrop();
        let (cake_scene, cake_rig) = self.build_cake();
        let (heart_scene, heart) = self.build_heart();

        log::info!(
            "built scenes: {} backdrop nodes, {} cake nodes, {} heart nodes",
            backdrop_scene.node_count(),
            cake_scene.node_count(),
            heart_scene.node_count()
        );

        let rig = CardRig {
            particles,
            cake: cake_rig,
            heart,
        };
        (
            SceneStage::new(backdrop_scene, cake_scene, heart_scene),
            rig,
        )
    }

    fn panel_camera(&self) -> PerspectiveCamera {
        PerspectiveCamera::new(
            self.camera.fov,
            self.camera.near,
            self.camera.far,
            self.camera.distance,
        )
    }

    fn build_backdrop(&mut self) -> (Scene, NodeKey) {
        let mut scene = Scene::new(PerspectiveCamera::new(
            self.camera.fov,
            self.camera.near,
            self.camera.backdrop_far,
            self.camera.distance,
        ));

        let spread = self.backdrop.spread;
        let positions: Vec<Vec3> = (0..self.backdrop.particle_count)
            .map(|_| {
                Vec3::new(
                    self.rng.gen_range(-spread..=spread),
                    self.rng.gen_range(-spread..=spread),
                    self.rng.gen_range(-spread..=spread),
                )
            })
            .collect();

        let [r, g, b] = self.backdrop.color;
        let particles = scene.add_node(
            Node::points(PointCloud {
                positions,
                size: self.backdrop.particle_size,
                color: [r, g, b, self.backdrop.opacity],
            })
            .with_name("particles"),
        );

        (scene, particles)
    }

    fn build_cake(&self) -> (Scene, CakeRig) {
        let mut scene = Scene::new(self.panel_camera());

        let group = scene.add_node(
            Node::group()
                .with_name("cake")
                .with_position(Vec3::new(0.0, -0.5, 0.0)),
        );

        let mut tier_keys = [NodeKey::default(); 3];
        for (i, &(radius, height, y, color)) in TIERS.iter().enumerate() {
            tier_keys[i] = scene.add_node(
                Node::mesh(
                    MeshShape::Cylinder {
                        radius,
                        height,
                        radial_segments: 32,
                    },
                    Material::from_hex(color),
                )
                .with_parent(group)
                .with_position(Vec3::new(0.0, y, 0.0)),
            );
        }

        let candle = scene.add_node(
            Node::mesh(
                MeshShape::Cylinder {
                    radius: 0.05,
                    height: 0.4,
                    radial_segments: 16,
                },
                Material::from_hex(0xffffff),
            )
            .with_name("candle")
            .with_parent(group)
            .with_position(Vec3::new(0.0, CANDLE_Y, 0.0)),
        );

        let flame = scene.add_node(
            Node::mesh(
                MeshShape::Sphere {
                    radius: 0.08,
                    segments: 16,
                    rings: 16,
                },
                Material::from_hex(0xffcc00).unlit(),
            )
            .with_name("flame")
            .with_parent(group)
            .with_position(Vec3::new(0.0, FLAME_Y, 0.0)),
        );

        let rig = CakeRig {
            group,
            tier0: tier_keys[0],
            tier1: tier_keys[1],
            tier2: tier_keys[2],
            candle,
            flame,
            rest_heights: [TIERS[0].2, TIERS[1].2, TIERS[2].2, CANDLE_Y, FLAME_Y],
        };
        (scene, rig)
    }

    fn build_heart(&self) -> (Scene, NodeKey) {
        let mut scene = Scene::new(self.panel_camera());

        let outline = heart_outline();
        let mut node = Node::mesh(
            MeshShape::Extrusion {
                outline: outline.points().to_vec(),
                depth: 0.4,
                bevel_thickness: 0.1,
                bevel_size: 0.1,
            },
            Material::from_hex(HEART_COLOR).with_shininess(100.0),
        )
        .with_name("heart")
        .with_position(Vec3::new(-0.5, 0.0, 0.0));
        // The outline is authored tip-up; flip it around Z
        node.transform.rotation.z = std::f32::consts::PI;
        node.transform.scale = Vec3::splat(HEART_SCALE);
        let heart = scene.add_node(node);

        (scene, heart)
    }
}

/// The heart silhouette as a closed cubic-Bezier outline
fn heart_outline() -> PathOutline {
    let mut path = PathOutline::new();
    path.move_to(0.5, 0.5);
    path.bezier_curve_to(0.5, 0.5, 0.4, 0.0, 0.0, 0.0);
    path.bezier_curve_to(-0.6, 0.0, -0.6, 0.7, -0.6, 0.7);
    path.bezier_curve_to(-0.6, 1.1, -0.3, 1.54, 0.5, 1.9);
    path.bezier_curve_to(1.2, 1.54, 1.6, 1.1, 1.6, 0.7);
    path.bezier_curve_to(1.6, 0.7, 1.6, 0.0, 1.0, 0.0);
    path.bezier_curve_to(0.7, 0.0, 0.5, 0.5, 0.5, 0.5);
    path
}
