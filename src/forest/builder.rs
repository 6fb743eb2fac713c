//! Scene construction
//!
//! One synchronous pass assembles the whole forest from primitive meshes:
//! terrain slabs, the water strip, the sun pair, the bamboo grove, lily
//! pads, pebble rows, hills and the skybox. The panda models and the
//! welcome banner arrive later through async loads and are spliced in by
//! [`add_panda`] and [`add_welcome_text`].
//!
//! The random source is injected so tests can seed it; it only picks
//! per-instance size and rotation variants and never affects placement.

use cgmath::{Deg, Vector3};
use rand::Rng;

use crate::assets::{LoadedModel, TextureLibrary};
use crate::gfx::{
    geometry,
    resources::material::Material,
    scene::{
        light::{AmbientLight, LightRig, PointLight, SpotLight},
        object::{Mesh, SceneObject},
        scene::Scene,
    },
    text::FontAtlas,
};

use super::interaction::TEXT_REST_COLOR;
use super::layout;

/// Name of the clickable banner object
pub const WELCOME_TEXT_NAME: &str = "welcome_text";
/// What the banner says
pub const WELCOME_TEXT: &str = "Welcome to Panda Forest!";
/// World-space height of the banner glyphs
pub const WELCOME_TEXT_SIZE: f32 = 14.0;

/// Scene indices of the objects the frame driver animates
#[derive(Debug, Clone, Copy)]
pub struct SceneHandles {
    pub sun: usize,
    pub sun_ring: usize,
}

/// The forest's light setup: warm ambient, one static point light above the
/// scene and the shadow-casting light that tracks the sun
pub fn forest_lights() -> LightRig {
    LightRig {
        ambient: AmbientLight {
            color: [1.0, 1.0, 0.969],
            intensity: 0.6,
        },
        point: PointLight {
            position: Vector3::new(0.0, 100.0, 0.0),
            color: [1.0, 1.0, 1.0],
            intensity: 0.4,
        },
        spot: SpotLight {
            position: Vector3::new(0.0, 60.0, 0.0),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            shadow_map_size: 512,
            shadow_near: 0.5,
            shadow_far: 500.0,
            shadow_fovy: Deg(45.0),
        },
    }
}

/// Variant picker matching the scene's decade-roll selection
///
/// Rolls 0..10 and reduces modulo the variant count, so small variant lists
/// are not quite uniformly weighted.
fn variant_index<R: Rng>(rng: &mut R, variant_count: usize) -> usize {
    (rng.random_range(0..10u32) as usize) % variant_count
}

/// A material backed by a texture when one loaded, or a flat tint when not
fn surface_material(textures: &mut TextureLibrary, name: &str, tint: [f32; 4]) -> Material {
    match textures.take(name) {
        Some(image) => Material::new(name, [1.0, 1.0, 1.0, 1.0]).with_image(image),
        None => Material::new(name, tint),
    }
}

/// Populates the scene graph with every statically placed object
///
/// Returns handles to the sun pair for the frame driver. Construction only
/// appends; nothing is removed afterwards.
pub fn build_forest<R: Rng>(
    scene: &mut Scene,
    textures: &mut TextureLibrary,
    rng: &mut R,
) -> SceneHandles {
    build_terrain(scene, textures);
    let handles = build_sun(scene, textures);
    build_bamboo(scene, textures, rng);
    build_lily_pads(scene, textures);
    build_pebbles(scene, textures, rng);
    build_hills(scene, textures);
    build_skybox(scene, textures);

    log::info!("Forest built: {} objects", scene.get_object_count());
    handles
}

fn build_terrain(scene: &mut Scene, textures: &mut TextureLibrary) {
    scene.add_material(surface_material(textures, "dirt", [0.47, 0.33, 0.23, 1.0]));
    scene.add_material(surface_material(textures, "grass", [0.26, 0.49, 0.09, 1.0]));
    scene.add_material(surface_material(textures, "water", [0.14, 0.54, 0.85, 1.0]));

    let dirt = Mesh::from_geometry(&geometry::generate_box(200.0, 6.0, 200.0));
    scene.add_object(
        SceneObject::new("dirt", vec![dirt])
            .with_material("dirt")
            .with_receive_shadow(),
    );

    let grass_left = Mesh::from_geometry(&geometry::generate_box(100.0, 8.0, 200.0));
    scene.add_object(
        SceneObject::new("grass_left", vec![grass_left])
            .with_material("grass")
            .with_position(-50.0, 7.0, 0.0)
            .with_receive_shadow(),
    );

    let grass_right = Mesh::from_geometry(&geometry::generate_box(60.0, 8.0, 200.0));
    scene.add_object(
        SceneObject::new("grass_right", vec![grass_right])
            .with_material("grass")
            .with_position(70.0, 7.0, 0.0)
            .with_receive_shadow(),
    );

    let grass_mid = Mesh::from_geometry(&geometry::generate_box(40.0, 8.0, 50.0));
    scene.add_object(
        SceneObject::new("grass_mid", vec![grass_mid])
            .with_material("grass")
            .with_position(20.0, 7.0, -75.0)
            .with_receive_shadow(),
    );

    let water = Mesh::from_geometry(&geometry::generate_box(40.0, 4.0, 150.0));
    scene.add_object(
        SceneObject::new("water", vec![water])
            .with_material("water")
            .with_position(20.0, 5.0, 25.0)
            .with_receive_shadow(),
    );
}

fn build_sun(scene: &mut Scene, textures: &mut TextureLibrary) -> SceneHandles {
    // The sun pair is self-luminous
    scene.add_material(surface_material(textures, "sun", [0.99, 0.72, 0.07, 1.0]).unlit());

    let sun_mesh = Mesh::from_geometry(&geometry::generate_sphere(10.0, 30, 25));
    let sun = scene.add_object(
        SceneObject::new("sun", vec![sun_mesh])
            .with_material("sun")
            .with_position(0.0, 125.0, 0.0)
            .with_cast_shadow(),
    );

    let ring_mesh = Mesh::from_geometry(&geometry::generate_ring(12.0, 16.0, 8));
    let sun_ring = scene.add_object(
        SceneObject::new("sun_ring", vec![ring_mesh])
            .with_material("sun")
            .with_position(0.0, 125.0, 0.0)
            .with_cast_shadow(),
    );

    SceneHandles { sun, sun_ring }
}

fn build_bamboo<R: Rng>(scene: &mut Scene, textures: &mut TextureLibrary, rng: &mut R) {
    scene.add_material(surface_material(textures, "bamboo", [0.36, 0.63, 0.15, 1.0]));

    for (i, (x, z)) in layout::bamboo_placements().iter().enumerate() {
        let (height, y) = layout::STALK_VARIANTS[variant_index(rng, 2)];
        let stalk = Mesh::from_geometry(&geometry::generate_cylinder(1.0, height, 30));
        scene.add_object(
            SceneObject::new(&format!("bamboo_{}", i), vec![stalk])
                .with_material("bamboo")
                .with_position(x, y, z)
                .with_cast_shadow(),
        );
    }
}

fn build_lily_pads(scene: &mut Scene, textures: &mut TextureLibrary) {
    scene.add_material(
        surface_material(textures, "lilypad", [0.18, 0.46, 0.23, 1.0])
            .with_emission(1.0, 1.0, 0.0, 0.3),
    );

    for (i, (x, z)) in layout::lily_pad_placements().iter().enumerate() {
        let pad = Mesh::from_geometry(&geometry::generate_circle(3.0, 30));
        scene.add_object(
            SceneObject::new(&format!("lilypad_{}", i), vec![pad])
                .with_material("lilypad")
                // Discs generate upright; lay them flat on the water
                .with_rotation_x(Deg(-90.0))
                .with_position(x, 7.5, z)
                .with_cast_shadow(),
        );
    }
}

fn build_pebbles<R: Rng>(scene: &mut Scene, textures: &mut TextureLibrary, rng: &mut R) {
    scene.add_material(surface_material(textures, "rock", [0.50, 0.52, 0.53, 1.0]));

    for (row, &x) in layout::PEBBLE_ROW_X.iter().enumerate() {
        for j in 0..layout::PEBBLES_PER_ROW {
            let y = layout::PEBBLE_Y_VARIANTS[variant_index(rng, layout::PEBBLE_Y_VARIANTS.len())];
            let yaw =
                layout::PEBBLE_YAW_VARIANTS[variant_index(rng, layout::PEBBLE_YAW_VARIANTS.len())];
            let z = layout::PEBBLE_ROW_Z_START + j as f32 * layout::PEBBLE_SPACING;

            let mut pebble = SceneObject::new(
                &format!("rock_{}_{}", row, j),
                vec![Mesh::from_geometry(&geometry::generate_tetrahedron(2.0, 3))],
            )
            .with_material("rock")
            .with_position(x, y, z)
            .with_cast_shadow();
            pebble.rotate_y(cgmath::Rad(yaw));

            scene.add_object(pebble);
        }
    }
}

fn build_hills(scene: &mut Scene, textures: &mut TextureLibrary) {
    scene.add_material(surface_material(textures, "hill", [0.35, 0.30, 0.25, 1.0]));

    for (i, &x) in layout::HILL_X.iter().enumerate() {
        let hill = Mesh::from_geometry(&geometry::generate_cone(25.0, 70.0, 15));
        scene.add_object(
            SceneObject::new(&format!("hill_{}", i), vec![hill])
                .with_material("hill")
                .with_position(x, 46.0, -75.0)
                .with_cast_shadow(),
        );
    }
}

fn build_skybox(scene: &mut Scene, textures: &mut TextureLibrary) {
    const SKY_SIZE: f32 = 800.0;
    const SKY_CENTER_Y: f32 = -100.0;
    const SKY_TINT: [f32; 4] = [0.53, 0.81, 0.92, 1.0];

    let half = SKY_SIZE * 0.5;

    // Face name, position, (yaw, pitch)
    let faces: [(&str, [f32; 3], (f32, f32)); 6] = [
        ("sky_front", [0.0, SKY_CENTER_Y, half], (180.0, 0.0)),
        ("sky_back", [0.0, SKY_CENTER_Y, -half], (0.0, 0.0)),
        ("sky_left", [-half, SKY_CENTER_Y, 0.0], (90.0, 0.0)),
        ("sky_right", [half, SKY_CENTER_Y, 0.0], (-90.0, 0.0)),
        ("sky_up", [0.0, SKY_CENTER_Y + half, 0.0], (0.0, 90.0)),
        ("sky_down", [0.0, SKY_CENTER_Y - half, 0.0], (0.0, -90.0)),
    ];

    for (name, position, (yaw, pitch)) in faces {
        scene.add_material(surface_material(textures, name, SKY_TINT).unlit());

        let quad = Mesh::from_geometry(&geometry::generate_quad(SKY_SIZE, SKY_SIZE));
        let mut face = SceneObject::new(name, vec![quad])
            .with_material(name)
            .with_position(position[0], position[1], position[2]);
        if pitch != 0.0 {
            face = face.with_rotation_x(Deg(pitch));
        } else if yaw != 0.0 {
            face = face.with_rotation_y(Deg(yaw));
        }

        scene.add_object(face);
    }
}

/// Splices a completed panda model load into the scene
///
/// Both panda instances come through here; the first one also becomes the
/// movable model reference held by the app.
pub fn add_panda(
    scene: &mut Scene,
    model: &LoadedModel,
    name: &str,
    position: Vector3<f32>,
    yaw: Deg<f32>,
) -> usize {
    for material in &model.materials {
        let id = format!("panda_{}", material.name);
        if scene.material_manager.get_material(&id).is_none() {
            scene.add_material(Material::new(
                &id,
                [
                    material.diffuse[0],
                    material.diffuse[1],
                    material.diffuse[2],
                    material.alpha,
                ],
            ));
        }
    }

    let meshes: Vec<Mesh> = model
        .meshes
        .iter()
        .map(|m| {
            Mesh::from_raw(
                m.positions.clone(),
                m.normals.clone(),
                m.uvs.clone(),
                m.indices.clone(),
            )
        })
        .collect();

    let mut object = SceneObject::new(name, meshes)
        .with_position(position.x, position.y, position.z)
        .with_rotation_y(yaw)
        .with_scale(5.0)
        .with_cast_shadow();

    // Material of the first mesh colors the whole model
    if let Some(material_index) = model.meshes.first().and_then(|m| m.material_index) {
        if let Some(material) = model.materials.get(material_index) {
            object.material_id = Some(format!("panda_{}", material.name));
        }
    }

    scene.add_object(object)
}

/// Splices the welcome banner into the scene once its font has loaded
pub fn add_welcome_text(scene: &mut Scene, atlas: &FontAtlas) -> usize {
    scene.add_material(
        Material::new(WELCOME_TEXT_NAME, TEXT_REST_COLOR).with_image(atlas.image().clone()),
    );

    let mesh = crate::gfx::text::build_text_mesh(atlas, WELCOME_TEXT);
    let object = SceneObject::new(WELCOME_TEXT_NAME, vec![mesh])
        .with_material(WELCOME_TEXT_NAME)
        .with_position(-100.0, 100.0, -80.0)
        // Glyphs are laid out in pixels; scale them to banner size
        .with_scale(WELCOME_TEXT_SIZE / atlas.font_size())
        .with_receive_shadow();

    scene.add_object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::rig::CameraRig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn empty_scene() -> Scene {
        Scene::new(CameraRig::new(1.0), forest_lights())
    }

    fn built_scene(seed: u64) -> (Scene, SceneHandles) {
        let mut scene = empty_scene();
        let mut textures = TextureLibrary::empty();
        let mut rng = StdRng::seed_from_u64(seed);
        let handles = build_forest(&mut scene, &mut textures, &mut rng);
        (scene, handles)
    }

    #[test]
    fn bamboo_count_matches_placement_table() {
        let (scene, _) = built_scene(7);
        let stalks = scene
            .objects
            .iter()
            .filter(|obj| obj.name.starts_with("bamboo_"))
            .count();
        assert_eq!(stalks, layout::bamboo_placements().len());
    }

    #[test]
    fn bamboo_positions_follow_the_table_pairs() {
        let (scene, _) = built_scene(7);
        for (i, (x, z)) in layout::bamboo_placements().iter().enumerate() {
            let stalk = scene
                .objects
                .iter()
                .find(|obj| obj.name == format!("bamboo_{}", i))
                .expect("stalk exists");
            assert_eq!(stalk.position.x, x);
            assert_eq!(stalk.position.z, z);
        }
    }

    #[test]
    fn randomness_never_affects_placement() {
        let (scene_a, _) = built_scene(1);
        let (scene_b, _) = built_scene(999);

        for (a, b) in scene_a.objects.iter().zip(scene_b.objects.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.position.x, b.position.x);
            assert_eq!(a.position.z, b.position.z);
        }
    }

    #[test]
    fn stalk_heights_come_from_the_variant_table() {
        let (scene, _) = built_scene(42);
        for obj in scene.objects.iter().filter(|o| o.name.starts_with("bamboo_")) {
            assert!(layout::STALK_VARIANTS
                .iter()
                .any(|&(_, y)| y == obj.position.y));
        }
    }

    #[test]
    fn lily_pads_sit_on_the_water() {
        let (scene, _) = built_scene(3);
        let pads: Vec<_> = scene
            .objects
            .iter()
            .filter(|obj| obj.name.starts_with("lilypad_"))
            .collect();

        assert_eq!(pads.len(), layout::lily_pad_placements().len());
        for pad in pads {
            assert_eq!(pad.position.y, 7.5);
        }
    }

    #[test]
    fn pebble_rows_are_fully_populated() {
        let (scene, _) = built_scene(11);
        let pebbles = scene
            .objects
            .iter()
            .filter(|obj| obj.name.starts_with("rock_"))
            .count();
        assert_eq!(pebbles, layout::PEBBLE_ROW_X.len() * layout::PEBBLES_PER_ROW);
    }

    #[test]
    fn sun_handles_point_at_the_sun_pair() {
        let (scene, handles) = built_scene(5);
        assert_eq!(scene.objects[handles.sun].name, "sun");
        assert_eq!(scene.objects[handles.sun_ring].name, "sun_ring");

        // Both start at the sun's resting position
        assert_eq!(scene.objects[handles.sun].position.y, 125.0);
    }

    #[test]
    fn terrain_receives_shadows_and_decor_casts_them() {
        let (scene, _) = built_scene(5);

        let dirt = &scene.objects[scene.index_of("dirt").unwrap()];
        assert!(dirt.receive_shadow);
        assert!(!dirt.cast_shadow);

        let stalk = &scene.objects[scene.index_of("bamboo_0").unwrap()];
        assert!(stalk.cast_shadow);
    }

    #[test]
    fn skybox_has_six_unlit_faces() {
        let (scene, _) = built_scene(5);
        let faces = scene
            .objects
            .iter()
            .filter(|obj| obj.name.starts_with("sky_"))
            .count();
        assert_eq!(faces, 6);

        let material = scene.material_manager.get_material("sky_up").unwrap();
        assert_eq!(
            material.shading,
            crate::gfx::resources::material::ShadingModel::Unlit
        );
    }
}
