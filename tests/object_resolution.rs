mod common;

use std::rc::Rc;

use approx::assert_relative_eq;
use azely::{
    cache::CacheKey,
    object::{SolarBody, Target},
    services::SkyPosition,
    AzelyError,
};
use common::{Sandbox, ScriptedHttp, M87_SESAME};

const SESAME: &str = "https://cds.unistra.fr";

#[test]
fn test_sun_is_a_solar_body() {
    let sandbox = Sandbox::new().with_config("");
    let http = Rc::new(ScriptedHttp::default());
    let azely = sandbox.azely(http.clone());

    let sun = azely.resolve_object("Sun", None, None).unwrap();
    assert_eq!(sun.target(), &Target::SolarBody { body: SolarBody::Sun });
    assert_eq!(sun.coordinates(), None);
    assert_eq!(http.total(), 0);
}

#[test]
fn test_tag_expands_to_every_entry() {
    let sandbox = Sandbox::new().with_config("");
    let azely = sandbox.azely(Rc::new(ScriptedHttp::default()));

    let objects = azely.resolve_objects("#mytag", None, None).unwrap();
    assert_eq!(objects.len(), 2);

    assert_eq!(objects[0].name(), "M87");
    assert_eq!(objects[0].frame(), Some("icrs"));
    let (ra, dec) = objects[0].coordinates().unwrap();
    assert_relative_eq!(ra, 187.7059, epsilon = 1e-4);
    assert_relative_eq!(dec, 12.3911, epsilon = 1e-4);

    assert_eq!(objects[1].name(), "Sgr A*");
    assert_eq!(objects[1].frame(), Some("galactic"));
    assert!(objects.iter().all(|o| o.coordinates().is_some()));
}

#[test]
fn test_single_entry_of_a_tag() {
    let sandbox = Sandbox::new().with_config("");
    let azely = sandbox.azely(Rc::new(ScriptedHttp::default()));

    let sgr = azely.resolve_object("#mytag:sgr_a", None, None).unwrap();
    assert_eq!(sgr.name(), "Sgr A*");

    let err = azely.resolve_object("#mytag", None, None).unwrap_err();
    assert!(matches!(err, AzelyError::ObjectResolution { .. }));

    let err = azely.resolve_object("#mytag:M31", None, None).unwrap_err();
    assert!(matches!(err, AzelyError::ObjectResolution { ref query, .. } if query == "#mytag:M31"));
}

#[test]
fn test_unknown_tag_names_the_search_path() {
    let sandbox = Sandbox::new().with_config("");
    let azely = sandbox.azely(Rc::new(ScriptedHttp::default()));

    match azely.resolve_objects("#missing", None, None).unwrap_err() {
        AzelyError::CatalogNotFound { tag, searched } => {
            assert_eq!(tag, "missing");
            assert_eq!(searched, vec![sandbox.dir.clone()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_solar_body_wins_over_everything_else() {
    let sandbox = Sandbox::new().with_config("");
    // the name service would happily answer for "moon" too
    let http = Rc::new(ScriptedHttp::default().answer(SESAME, M87_SESAME));
    let azely = sandbox.azely(http.clone());

    let moon = azely.resolve_object("MOON", Some("galactic"), None).unwrap();
    assert_eq!(moon.solar_body(), Some(SolarBody::Moon));
    assert_eq!(http.total(), 0);
}

#[test]
fn test_coordinate_literal_uses_requested_frame() {
    let sandbox = Sandbox::new().with_config("");
    let http = Rc::new(ScriptedHttp::default());
    let azely = sandbox.azely(http.clone());

    let object = azely
        .resolve_object("Field-1 12:00:00 -30:00:00", Some("fk5"), None)
        .unwrap();
    assert_eq!(object.name(), "Field-1");
    assert_eq!(object.coordinates(), Some((180.0, -30.0)));
    assert_eq!(object.frame(), Some("fk5"));
    assert_eq!(http.total(), 0);
}

#[test]
fn test_online_name_lookup_is_cached() {
    let sandbox = Sandbox::new().with_config("");
    let http = Rc::new(ScriptedHttp::default().answer(SESAME, M87_SESAME));
    let azely = sandbox.azely(http.clone());

    let m87 = azely.resolve_object("M87", None, None).unwrap();
    assert_eq!(m87.frame(), Some("icrs"));
    let (ra, dec) = m87.coordinates().unwrap();
    assert_relative_eq!(ra, 187.70593075);
    assert_relative_eq!(dec, 12.39112331);

    let restarted = sandbox.azely(http.clone());
    assert_eq!(restarted.resolve_object("m87", None, None).unwrap().coordinates(), m87.coordinates());
    assert_eq!(http.count(SESAME), 1);

    let key = CacheKey::new("object_by_name").arg("query", "m87");
    let stored: SkyPosition = restarted.object_cache().get(&key).unwrap();
    assert_relative_eq!(stored.ra, 187.70593075);
}

#[test]
fn test_unknown_name_fails_after_all_strategies() {
    let sandbox = Sandbox::new().with_config("");
    let http = Rc::new(ScriptedHttp::default().answer(SESAME, "# Nothing\n#! *** Nothing found ***\n"));
    let azely = sandbox.azely(http);

    let err = azely.resolve_object("Planet Nine", None, None).unwrap_err();
    assert!(matches!(err, AzelyError::ObjectResolution { ref query, .. } if query == "Planet Nine"));
    assert!(azely.object_cache().is_empty());
}
