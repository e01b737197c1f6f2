//! Demo listings for a fresh in-memory deployment.

use discovery_sdk::{GeoPoint, LifecycleStatus, PracticeLocation, Therapist};
use marketplace_sdk::{Clinic, ClinicSpaceListing};

fn therapist(
    id: &str,
    name: &str,
    status: LifecycleStatus,
    specializations: &[&str],
    languages: &[&str],
    location: (&str, f64, f64),
) -> Therapist {
    let mut t = Therapist::draft(id, name);
    t.account_status = status;
    t.bio = format!("{name} offers in-person and online sessions.");
    t.specializations = specializations.iter().map(|s| (*s).to_owned()).collect();
    t.languages = languages.iter().map(|s| (*s).to_owned()).collect();
    t.locations = vec![PracticeLocation {
        address: location.0.to_owned(),
        coordinates: Some(GeoPoint::new(location.1, location.2)),
        is_primary: true,
    }];
    t
}

#[must_use]
pub fn therapists() -> Vec<Therapist> {
    vec![
        therapist(
            "demo-amal",
            "Amal Hassan",
            LifecycleStatus::Live,
            &["Anxiety Counseling", "Depression Support"],
            &["Arabic", "English"],
            ("Zamalek, Cairo", 30.0626, 31.2197),
        ),
        therapist(
            "demo-karim",
            "Karim Fathy",
            LifecycleStatus::Live,
            &["Couples Therapy"],
            &["Arabic"],
            ("Maadi, Cairo", 29.9602, 31.2569),
        ),
        therapist(
            "demo-zeina",
            "Zeina Mostafa",
            LifecycleStatus::Live,
            &["Anxiety Counseling", "Child Psychology"],
            &["English", "French"],
            ("Heliopolis, Cairo", 30.0911, 31.3225),
        ),
        therapist(
            "demo-dina",
            "Dina Adel",
            LifecycleStatus::PendingApproval,
            &["Trauma Therapy"],
            &["Arabic"],
            ("Dokki, Giza", 30.0381, 31.2118),
        ),
    ]
}

#[must_use]
pub fn clinics() -> Vec<Clinic> {
    let mut clinic = Clinic::draft("demo-nile-rooms", "demo-nile-rooms");
    clinic.name = "Nile Rooms".to_owned();
    clinic.address = "12 Tahrir St, Cairo".to_owned();
    clinic.amenities = vec!["Wi-Fi".to_owned(), "Waiting area".to_owned()];
    clinic.account_status = LifecycleStatus::Live;
    clinic.listings = vec![ClinicSpaceListing {
        id: "demo-room-a".to_owned(),
        clinic_id: clinic.id.clone(),
        clinic_name: clinic.name.clone(),
        clinic_address: clinic.address.clone(),
        name: "Therapy Room A".to_owned(),
        rental_price: 350.0,
        rental_duration: "hour".to_owned(),
        ..ClinicSpaceListing::default()
    }];
    vec![clinic]
}
