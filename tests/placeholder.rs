//! Behavioural tests for placeholder inheritance, classification, picture
//! insertion and placeholder text.

mod common;

use std::cell::RefCell;

use lectern::OoxmlError;
use lectern::ooxml::pptx::parts::image::sha1_hex;
use lectern::ooxml::pptx::{Package, Placeholder, ShapeLocator};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

/// Scenario state, rebuilt for every scenario.
#[derive(Default)]
struct World {
    package: Option<Package>,
    /// Placeholder the scenario is about
    target: Option<ShapeLocator>,
    /// A second picture placeholder sharing the scenario's image
    second: Option<ShapeLocator>,
    /// Title placeholder of a freshly added slide
    title: Option<ShapeLocator>,
    /// Bytes of the last inserted picture
    image: Vec<u8>,
    refusal: Option<OoxmlError>,
    dir: Option<TempDir>,
}

impl World {
    fn package(&self) -> &Package {
        self.package.as_ref().expect("scenario has a presentation")
    }

    fn target(&self) -> &ShapeLocator {
        self.target.as_ref().expect("scenario has a target placeholder")
    }

    fn placeholder(&self) -> Placeholder<'_> {
        self.package()
            .shape(self.target())
            .expect("target shape exists")
            .placeholder()
            .expect("target shape is a placeholder")
    }

    fn open(&mut self, deck: Vec<u8>) {
        self.package = Some(Package::from_bytes(deck).expect("test deck opens"));
    }

    /// Locator of placeholder `idx` on slide `slide`.
    fn slide_placeholder(&self, slide: usize, idx: u32) -> ShapeLocator {
        let pres = self.package().presentation().expect("presentation");
        pres.slide(slide).unwrap().placeholder(idx).unwrap().locator()
    }

    fn insert_picture(&mut self, width: u32, height: u32) -> lectern::Result<()> {
        let target = self.target().clone();
        self.insert_picture_into(&target, width, height)
    }

    /// Write a PNG into the scenario directory and insert it by path.
    fn insert_picture_into(
        &mut self,
        target: &ShapeLocator,
        width: u32,
        height: u32,
    ) -> lectern::Result<()> {
        let dir = self
            .dir
            .get_or_insert_with(|| TempDir::new().expect("temporary directory"));
        let path = dir.path().join(format!("picture-{width}x{height}.png"));
        let png = common::png(width, height);
        std::fs::write(&path, &png).expect("write picture");

        let package = self.package.as_mut().expect("scenario has a presentation");
        package.insert_picture_file(target, &path)?;
        self.image = png;
        Ok(())
    }
}

#[fixture]
fn world() -> RefCell<World> {
    RefCell::new(World::default())
}

#[given("a master placeholder")]
fn master_placeholder(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::inherit_props_deck());
    let locator = {
        let pres = w.package().presentation().expect("presentation");
        pres.slide_master().unwrap().placeholder(1).unwrap().locator()
    };
    w.target = Some(locator);
}

#[given("a layout placeholder having directly set position and size")]
fn layout_placeholder_direct(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::inherit_props_deck());
    let locator = {
        let pres = w.package().presentation().expect("presentation");
        pres.slide_layout(0).unwrap().placeholder(1).unwrap().locator()
    };
    w.target = Some(locator);
}

#[given("a layout placeholder having no direct position or size")]
fn layout_placeholder_inherited(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::inherit_props_deck());
    let locator = {
        let pres = w.package().presentation().expect("presentation");
        pres.slide_layout(0).unwrap().placeholder(0).unwrap().locator()
    };
    w.target = Some(locator);
}

#[given("a slide placeholder having directly set position and size")]
fn slide_placeholder_direct(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::inherit_props_deck());
    let locator = {
        let pres = w.package().presentation().expect("presentation");
        pres.slide(0).unwrap().placeholder(10).unwrap().locator()
    };
    w.target = Some(locator);
}

#[given("a slide placeholder having no direct position or size")]
fn slide_placeholder_inherited(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::inherit_props_deck());
    let locator = {
        let pres = w.package().presentation().expect("presentation");
        pres.slide(0).unwrap().placeholder(0).unwrap().locator()
    };
    w.target = Some(locator);
}

#[given("a slide placeholder having a direct size only")]
fn slide_placeholder_sized(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::inherit_props_deck());
    let target = w.slide_placeholder(2, 10);
    w.target = Some(target);
}

#[given("a slide placeholder with no matching layout placeholder")]
fn slide_placeholder_orphan(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::inherit_props_deck());
    let target = w.slide_placeholder(2, 7);
    w.target = Some(target);
}

#[given("two unpopulated picture placeholders on different slides")]
fn two_picture_placeholders(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::inherit_props_deck());
    let target = w.slide_placeholder(1, 10);
    w.target = Some(target);
    let second = w.slide_placeholder(3, 10);
    w.second = Some(second);
}

#[given("the picture placeholder of a deck holding a metafile")]
fn metafile_picture(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::metafile_deck());
    let target = w.slide_placeholder(0, 1);
    w.target = Some(target);
}

#[given("an unpopulated picture placeholder")]
fn unpopulated_picture_placeholder(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    w.open(common::inherit_props_deck());
    let locator = {
        let pres = w.package().presentation().expect("presentation");
        pres.slide(1).unwrap().placeholder(10).unwrap().locator()
    };
    w.target = Some(locator);
}

#[given("the {kind:string} placeholder of the {state} deck")]
fn deck_placeholder(#[from(world)] world: &RefCell<World>, kind: &str, state: String) {
    let populated = match state.as_str() {
        "populated" => true,
        "unpopulated" => false,
        other => panic!("unknown deck state {other}"),
    };
    let index = common::slide_index(populated, kind).expect("known placeholder kind");

    let mut w = world.borrow_mut();
    w.open(if populated {
        common::populated_deck()
    } else {
        common::unpopulated_deck()
    });
    let locator = {
        let pres = w.package().presentation().expect("presentation");
        pres.slide(index).unwrap().shape(0).unwrap().locator()
    };
    w.target = Some(locator);
}

#[given("a new presentation with a Title and Content slide")]
fn new_presentation(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    let mut package = Package::new().expect("default presentation");
    let (title, body) = {
        let slide = package.add_slide(1).expect("add slide");
        (
            slide.title().unwrap().expect("title placeholder").locator(),
            slide.placeholder(1).unwrap().locator(),
        )
    };
    w.package = Some(package);
    w.title = Some(title);
    w.target = Some(body);
}

#[when("I insert a {width} by {height} pixel picture into it")]
fn insert_picture(#[from(world)] world: &RefCell<World>, width: u32, height: u32) {
    world
        .borrow_mut()
        .insert_picture(width, height)
        .expect("picture inserted");
}

#[when("I try to insert a {width} by {height} pixel picture into it")]
fn try_insert_picture(#[from(world)] world: &RefCell<World>, width: u32, height: u32) {
    let mut w = world.borrow_mut();
    let refusal = w.insert_picture(width, height).err();
    w.refusal = refusal;
}

#[when("I insert the same {width} by {height} pixel picture into both")]
fn insert_picture_twice(#[from(world)] world: &RefCell<World>, width: u32, height: u32) {
    let mut w = world.borrow_mut();
    let second = w.second.clone().expect("second picture placeholder");
    w.insert_picture(width, height).expect("first picture inserted");
    w.insert_picture_into(&second, width, height)
        .expect("second picture inserted");
}

#[when("I save and reload the presentation")]
fn save_and_reload(#[from(world)] world: &RefCell<World>) {
    let mut w = world.borrow_mut();
    let bytes = w.package().to_bytes().expect("presentation saves");
    w.open(bytes);
}

#[when("I indent the first body paragraph to level {level}")]
fn indent_first_paragraph(#[from(world)] world: &RefCell<World>, level: u8) {
    let mut w = world.borrow_mut();
    let target = w.target().clone();
    w.package
        .as_mut()
        .unwrap()
        .set_paragraph_level(&target, 0, level)
        .expect("level set");
}

#[when("I set the title text to {text:string}")]
fn set_title_text(#[from(world)] world: &RefCell<World>, text: &str) {
    let mut w = world.borrow_mut();
    let title = w.title.clone().expect("title placeholder");
    w.package
        .as_mut()
        .unwrap()
        .set_text(&title, text)
        .expect("text set");
}

#[then("the placeholder frame is {left}, {top}, {width}, {height}")]
fn placeholder_frame(
    #[from(world)] world: &RefCell<World>,
    left: i64,
    top: i64,
    width: i64,
    height: i64,
) {
    let w = world.borrow();
    let ph = w.placeholder();
    assert_eq!(ph.left().unwrap(), left, "left");
    assert_eq!(ph.top().unwrap(), top, "top");
    assert_eq!(ph.width().unwrap(), width, "width");
    assert_eq!(ph.height().unwrap(), height, "height");
}

#[then("looking up the placeholder position fails as not found")]
fn placeholder_position_not_found(#[from(world)] world: &RefCell<World>) {
    let w = world.borrow();
    let ph = w.placeholder();
    assert!(matches!(ph.left(), Err(OoxmlError::PlaceholderNotFound(_))));
    assert!(matches!(ph.geometry(), Err(OoxmlError::PlaceholderNotFound(_))));
}

#[then("the placeholder proxy is {proxy}")]
fn placeholder_proxy(#[from(world)] world: &RefCell<World>, proxy: String) {
    assert_eq!(world.borrow().placeholder().proxy().name(), proxy);
}

#[then("the placeholder type is {ph_type}")]
fn placeholder_type(#[from(world)] world: &RefCell<World>, ph_type: String) {
    assert_eq!(world.borrow().placeholder().ph_type().to_string(), ph_type);
}

#[then("the placeholder idx is {idx}")]
fn placeholder_idx(#[from(world)] world: &RefCell<World>, idx: u32) {
    assert_eq!(world.borrow().placeholder().idx(), idx);
}

#[then("the shape type is {shape_type}")]
fn shape_type(#[from(world)] world: &RefCell<World>, shape_type: String) {
    let w = world.borrow();
    let shape = w.package().shape(w.target()).expect("target shape exists");
    assert_eq!(format!("{:?}", shape.shape_type()), shape_type);
}

#[then("the presentation holds {count} image part")]
fn image_part_count(#[from(world)] world: &RefCell<World>, count: usize) {
    let w = world.borrow();
    let media = w
        .package()
        .opc_package()
        .iter_parts()
        .filter(|part| part.partname().as_str().starts_with("/ppt/media/"))
        .count();
    assert_eq!(media, count);
}

#[then("both pictures embed that image part")]
fn pictures_share_image_part(#[from(world)] world: &RefCell<World>) {
    let w = world.borrow();
    let opc = w.package().opc_package();
    let media: Vec<_> = opc
        .iter_parts()
        .filter(|part| part.partname().as_str().starts_with("/ppt/media/"))
        .map(|part| part.partname().clone())
        .collect();
    for locator in [w.target(), w.second.as_ref().expect("second picture placeholder")] {
        let ph = w
            .package()
            .shape(locator)
            .expect("picture shape")
            .placeholder()
            .expect("picture placeholder");
        let picture = ph.as_picture().expect("placeholder holds a picture");
        let r_id = picture.image_r_id().expect("a:blip@r:embed");
        let target = opc
            .part(locator.partname())
            .expect("slide part")
            .related_partname(r_id)
            .expect("image relationship");
        assert_eq!(media, [target]);
    }
}

#[then("the picture image is the stored metafile")]
fn picture_image_is_metafile(#[from(world)] world: &RefCell<World>) {
    let w = world.borrow();
    let picture = w.placeholder().as_picture().expect("placeholder holds a picture");
    let image = picture.image().expect("picture image");
    assert_eq!(image.sha1(), sha1_hex(common::EMF));
    assert_eq!(image.content_type(), "image/x-emf");
    assert_eq!(image.size(), None);
}

#[then("the picture image matches the inserted file")]
fn picture_image_matches(#[from(world)] world: &RefCell<World>) {
    let w = world.borrow();
    let picture = w.placeholder().as_picture().expect("placeholder holds a picture");
    let image = picture.image().expect("picture image");
    assert_eq!(image.sha1(), sha1_hex(&w.image));
    assert_eq!(image.blob(), w.image.as_slice());
}

#[then("the crop is {left:f64}, {top:f64}, {right:f64}, {bottom:f64}")]
fn picture_crop(
    #[from(world)] world: &RefCell<World>,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
) {
    let w = world.borrow();
    let picture = w.placeholder().as_picture().expect("placeholder holds a picture");
    for (name, actual, expected) in [
        ("left", picture.crop_left().unwrap(), left),
        ("top", picture.crop_top().unwrap(), top),
        ("right", picture.crop_right().unwrap(), right),
        ("bottom", picture.crop_bottom().unwrap(), bottom),
    ] {
        assert!(
            (actual - expected).abs() < 2e-6,
            "{name} crop {actual} != {expected}"
        );
    }
}

#[then("the insertion is refused")]
fn insertion_refused(#[from(world)] world: &RefCell<World>) {
    let w = world.borrow();
    assert!(
        matches!(w.refusal, Some(OoxmlError::StateMismatch(_))),
        "expected a state mismatch, got {:?}",
        w.refusal
    );
}

#[then("the first body paragraph has level {level}")]
fn first_paragraph_level(#[from(world)] world: &RefCell<World>, level: u8) {
    let w = world.borrow();
    let frame = w.placeholder().text_frame().expect("body has a text frame");
    assert_eq!(frame.paragraphs()[0].level(), level);
}

#[then("the first title run reads {text:string}")]
fn first_title_run(#[from(world)] world: &RefCell<World>, text: &str) {
    let w = world.borrow();
    let title = w
        .package()
        .shape(w.title.as_ref().expect("title placeholder"))
        .expect("title shape");
    let frame = title.text_frame().expect("title has a text frame");
    assert_eq!(frame.paragraphs()[0].runs()[0].text(), text);
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Master placeholder has its own position and size"
)]
fn master_geometry(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Layout placeholder with direct position and size"
)]
fn layout_direct_geometry(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Layout placeholder inherits from the master"
)]
fn layout_inherited_geometry(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Slide placeholder with direct position and size"
)]
fn slide_direct_geometry(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Slide placeholder inherits through layout and master"
)]
fn slide_inherited_geometry(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Unpopulated picture placeholder inherits from its layout"
)]
fn picture_inherited_geometry(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Slide placeholder with only its own size keeps the layout position"
)]
fn slide_sized_geometry(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Slide placeholder without a matching layout slot"
)]
fn slide_orphan_geometry(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Unpopulated placeholders classify by type"
)]
fn unpopulated_classification(
    world: RefCell<World>,
    kind: String,
    proxy: String,
    ph_type: String,
    idx: String,
) {
    let _ = (world, kind, proxy, ph_type, idx);
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Populated placeholders classify by content"
)]
fn populated_classification(world: RefCell<World>, kind: String, proxy: String, idx: String) {
    let _ = (world, kind, proxy, idx);
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Insert a picture cropped to fit"
)]
fn insert_cropped_picture(
    world: RefCell<World>,
    width: String,
    height: String,
    left: String,
    top: String,
    right: String,
    bottom: String,
) {
    let _ = (world, width, height, left, top, right, bottom);
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "The same picture inserted twice is stored once"
)]
fn identical_pictures_share_a_part(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Picture placeholder holding a metafile"
)]
fn metafile_picture_image(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Picture placeholder accepts only one picture"
)]
fn picture_placeholder_filled_once(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Text placeholder refuses a picture"
)]
fn text_placeholder_refuses_picture(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Paragraph indent level survives a save"
)]
fn paragraph_level_round_trip(world: RefCell<World>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/placeholder.feature",
    name = "Title text survives a save"
)]
fn title_text_round_trip(world: RefCell<World>) {
    let _ = world;
}
