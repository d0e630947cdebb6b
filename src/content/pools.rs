// Phrase pools
//
// Every pool is non-empty. Placeholders: {city}, {region}, {service},
// {brand}, {model}, {landmark}, {highway}, {years}.

/// Visible text patterns for service/location cross-links
pub const ANCHOR_PATTERNS: &[&str] = &[
    "{service} in {city}",
    "{city} {service}",
    "{service} {city}",
    "{service} für {city}",
    "{service} im Raum {city}",
    "{service} vor Ort in {city}",
];

pub const LOCATION_HEADLINES: &[&str] = &[
    "Autoglas in {city}",
    "Autoglas-Service {city}",
    "Ihr Autoglas-Partner in {city}",
    "Autoglas {city}: schnell und zuverlässig",
    "Autoscheiben-Service in {city}",
];

pub const SERVICE_HEADLINES: &[&str] = &[
    "{service} in {city}",
    "{service} {city}: Termin oft schon am nächsten Tag",
    "Professioneller {service} in {city}",
    "{service} in {city} zum Festpreis",
    "{service} für {city} und Umgebung",
];

pub const VEHICLE_HEADLINES: &[&str] = &[
    "Scheibenwechsel {brand} {model}",
    "{brand} {model}: Windschutzscheibe tauschen",
    "Neue Frontscheibe für Ihren {brand} {model}",
    "Windschutzscheibe {brand} {model} wechseln lassen",
];

pub const LOCATION_INTROS: &[&str] = &[
    "Steinschlag oder Riss in der Scheibe? In {city} kümmern wir uns schnell um Ihr Autoglas.",
    "Ob Reparatur oder Austausch: Unser Autoglas-Service ist in ganz {city} für Sie da.",
    "Autofahrer in {city} und {region} vertrauen bei Glasschäden auf unseren Service.",
    "Beschädigte Autoscheibe in {city}? Wir reparieren oder tauschen sie fachgerecht.",
    "In {city} bieten wir Autoglas-Arbeiten für alle Marken und Modelle an.",
];

pub const SERVICE_INTROS: &[&str] = &[
    "{service} in {city}: Wir arbeiten mit Originalglas oder Glas in Erstausrüsterqualität.",
    "Sie brauchen einen {service} in {city}? Vereinbaren Sie online einen Termin.",
    "Unser {service} in {city} wird von geschulten Fachkräften durchgeführt.",
    "Für Ihren {service} in {city} rechnen wir auf Wunsch direkt mit der Versicherung ab.",
    "Schnell, sauber, sicher: {service} in {city} und im gesamten Gebiet {region}.",
];

pub const VEHICLE_INTROS: &[&str] = &[
    "Für den {brand} {model} ({years}) haben wir passende Scheiben schnell verfügbar.",
    "Der Scheibenwechsel am {brand} {model} gehört zu unseren häufigsten Aufträgen.",
    "Wir tauschen die Windschutzscheibe Ihres {brand} {model} fachgerecht und sicher.",
    "Riss in der Frontscheibe Ihres {brand} {model}? Wir helfen sofort weiter.",
];

pub const LANDMARK_SENTENCES: &[&str] = &[
    "Unsere Werkstatt erreichen Sie auch aus der Nähe von {landmark} bequem.",
    "Ob am {landmark} oder am Stadtrand: Wir kommen zu Ihnen.",
    "Rund um {landmark} sind unsere mobilen Teams täglich unterwegs.",
];

pub const HIGHWAY_SENTENCES: &[&str] = &[
    "Viele Steinschläge entstehen auf der {highway}. Lassen Sie kleine Schäden früh prüfen.",
    "Pendler auf der {highway} kennen das Problem: Ein Steinschlag kommt selten allein.",
    "Dank der Nähe zur {highway} sind wir schnell bei Ihnen.",
];

pub const TRAFFIC_HIGH_SENTENCES: &[&str] = &[
    "Bei dichtem Stadtverkehr in {city} ist klare Sicht besonders wichtig.",
    "Im dichten Verkehr von {city} passieren Glasschäden häufiger als gedacht.",
];

pub const TRAFFIC_MEDIUM_SENTENCES: &[&str] = &[
    "Auch abseits der Hauptstraßen von {city} sind wir für Sie erreichbar.",
    "Zwischen Stadt und Umland von {city} sind wir flexibel im Einsatz.",
];

pub const TRAFFIC_LOW_SENTENCES: &[&str] = &[
    "Auch in ruhigeren Lagen rund um {city} kommen wir gern vorbei.",
    "Kurze Wege in {city} bedeuten für Sie kurze Wartezeiten.",
];

pub const INDUSTRIAL_SENTENCES: &[&str] = &[
    "Für Firmenflotten in {city} bieten wir feste Ansprechpartner und Sammeltermine.",
    "Gewerbekunden in {city} profitieren von Terminen direkt auf dem Betriebsgelände.",
];

pub const UNIVERSITY_SENTENCES: &[&str] = &[
    "Studierende in {city} erhalten bei uns transparente Preise ohne Überraschungen.",
    "Auch rund um den Hochschulstandort {city} sind wir schnell vor Ort.",
];

pub const ADAS_SENTENCES: &[&str] = &[
    "Nach dem Scheibentausch kalibrieren wir die Frontkamera Ihres {model}.",
    "Fahrerassistenzsysteme des {brand} {model} werden nach dem Wechsel neu eingestellt.",
];

pub const RAIN_SENSOR_SENTENCES: &[&str] = &[
    "Der Regensensor wird sorgfältig auf die neue Scheibe übertragen.",
    "Wir achten darauf, dass der Regensensor nach dem Einbau einwandfrei arbeitet.",
];

pub const HUD_SENTENCES: &[&str] = &[
    "Für das Head-up-Display verbauen wir spezielles Projektionsglas.",
    "Scheiben mit Head-up-Display-Funktion haben wir für den {model} im Programm.",
];

/// Question and answer pairs
pub const FAQ: &[(&str, &str)] = &[
    (
        "Wie lange dauert ein {service} in {city}?",
        "In der Regel ist Ihr Fahrzeug nach wenigen Stunden wieder einsatzbereit.",
    ),
    (
        "Übernimmt die Versicherung den {service}?",
        "Mit Teilkasko ist der Glasschaden meist abgedeckt. Wir rechnen direkt ab.",
    ),
    (
        "Kommen Sie auch zu mir nach Hause in {city}?",
        "Ja, unser mobiler Service ist in {city} und {region} unterwegs.",
    ),
    (
        "Kann ein Steinschlag repariert werden statt die Scheibe zu tauschen?",
        "Kleine Schäden außerhalb des Sichtfelds lassen sich oft reparieren.",
    ),
    (
        "Welche Scheiben verwenden Sie?",
        "Wir verbauen Originalglas oder Glas in Erstausrüsterqualität.",
    ),
    (
        "Wie schnell bekomme ich einen Termin in {city}?",
        "Häufig ist ein Termin schon am nächsten Werktag möglich.",
    ),
];

pub const CALLS_TO_ACTION: &[&str] = &[
    "Jetzt Termin in {city} vereinbaren",
    "Kostenloses Angebot für {city} anfordern",
    "Rückruf für {city} anfordern",
    "Jetzt online buchen",
];
