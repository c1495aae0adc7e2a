//! Static flavour text shown by the rotations and tickers.

pub const BOOT_LOG: &[&str] = &[
    "[SYS] Initialising modules...",
    "[SEC] Verifying access keys...",
    "[NET] Synchronising imperial protocols...",
    "[ENC] Encrypting secure channel...",
    "[AUTH] Credentials confirmed...",
    "[OK ] Link established. Authorisation in progress...",
];

pub const DOCTRINE: &[&str] = &[
    "Respect the chain of command. Discipline = credibility.",
    "Brief communications. Clear orders. Immediate execution.",
    "Zero tolerance for disruption of the secure channel.",
    "Military bearing required. Imperial presence maintained.",
    "Rigour, control, authority. The Empire does not negotiate.",
];

pub const COMMS_TIPS: &[&str] = &[
    "Secure channel active. Throughput stable.",
    "Secondary relay on standby. No anomaly detected.",
    "External jamming: low. Continuous monitoring.",
    "HoloNet traffic filtered. Military network has priority.",
    "Transmission window established. Encryption active.",
];

pub const MILITARY_FEED: &[&str] = &[
    "Stormtrooper patrols deploying across the outer sectors.",
    "Encrypted transmission incoming from High Command.",
    "Strategic orders being distributed to operational units.",
    "Imperial fleet in orbital position. Intervention window open.",
    "Navigation lane control: temporary restrictions applied.",
    "ISB inspection announced. Any irregularity will be sanctioned.",
    "Unidentified signals intercepted: jamming in progress.",
    "Containment protocols activated on sensitive installations.",
    "Checkpoints reinforced. Identity checks intensified.",
    "Reconnaissance squads deployed. Zone under imperial watch.",
    "Tactical briefing sent to officers. Operational priorities updated.",
    "Logistics convoy on approach. Escort required.",
    "Hangar access restricted. Authorisation required.",
    "Communications control: unauthorised channels neutralised.",
    "Troop movement reported. Inter-unit coordination required.",
    "Munitions resupply: distribution scheduled.",
    "Coded message from Command: alert level raised.",
    "General staff: situation report expected. Strict deadlines.",
    "Crossing point surveillance: immediate intensification.",
    "Personnel reallocation: reinforcements redirected to sensitive zones.",
    "Enhanced search procedure: cargo and identity checks.",
    "Local alert: suspect(s) reported near a transmission relay.",
    "Temporary exclusion zone: access restricted to authorised personnel.",
    "Ballistic analysis under way following a perimeter incident.",
    "Sweep operation: progressive grid search of secondary routes.",
    "Take-off ban: hangars under administrative lockdown.",
    "Distress signal intercepted: authenticity being verified.",
    "Extraction preparation: security protocol activated.",
    "Military network: operational packets prioritised (QOS).",
    "Secondary relay ready: failover on traffic incident.",
    "ISB NOTE: individual referenced \"M\" flagged in several sealed archives. Criminal activity confirmed. Imperial surveillance maintained.",
];

pub const MILITARY_CAPTIONS: &[&str] = &[
    "Secure protocol active. Operational transmissions have priority.",
    "General staff: continuous incident monitoring.",
    "Reserved channel. Any disruption will be neutralised.",
    "Orders transmitted to units. Execution expected.",
    "Military network: reinforced encryption.",
];

pub const NEWS_FEED: &[&str] = &[
    "HOLO-NET: heavier traffic in the administrative district. Patrols reinforced.",
    "HOLO-NET: civic recruitment campaign launched. Goal: sector stabilisation.",
    "HOLO-NET: new distribution centre opens. Military families first.",
    "HOLO-NET: energy infrastructure upgrade. Work scheduled this week.",
    "HOLO-NET: customs checks increased. Transit times vary.",
    "HOLO-NET: incident at a civilian facility. Rebel involvement suspected.",
    "HOLO-NET: arrests after dissident leaflets circulated. Inquiry ongoing.",
    "HOLO-NET: tribute ceremony to imperial forces planned downtown.",
    "HOLO-NET: security drones deployed in crowded areas.",
    "HOLO-NET: fewer incidents on main routes after tighter checks.",
    "HOLO-NET: local curfew announced after isolated unrest.",
    "HOLO-NET: undeclared goods seized. Procedures reminder issued.",
    "HOLO-NET: transport disruption reported. Service returning to normal.",
    "HOLO-NET: medical services expanded in the sector. Capacity increased.",
    "HOLO-NET: emergency supply point opened. Controlled access.",
    "HOLO-NET: reconstruction programme announced for damaged zones.",
    "HOLO-NET: central market under control: random checks reinforced.",
    "HOLO-NET: weather report: strong winds on the outskirts. Caution advised.",
    "HOLO-NET: citizen notice: unauthorised communications are punishable.",
    "HOLO-NET: travel permit audit. Records must be updated.",
    "HOLO-NET: new restrictions on unscanned parcels. Systematic checks.",
    "HOLO-NET: main roads being resurfaced. Temporary diversions.",
    "HOLO-NET: poster campaign: \"Security & Stability\".",
    "HOLO-NET: administrative centres busier. Opening hours extended.",
    "HOLO-NET: minor incident neutralised by law enforcement.",
    "HOLO-NET: unapproved equipment discovered. Seized for analysis.",
    "HOLO-NET: reminder: undeclared gatherings banned in public spaces.",
    "HOLO-NET: water network optimisation. Planned outages announced.",
    "HOLO-NET: logistics assistance office opened. Isolated areas first.",
    "HOLO-NET: inquiry after HoloNet disruption. Backup relays active.",
];

pub const NEWS_CAPTIONS: &[&str] = &[
    "Public bulletin: continuous broadcast.",
    "Journal: operations coverage and official announcements.",
    "HoloNet: information validated by the authorities.",
    "Media: report under way on the civilian sectors.",
    "Notice: citizen directives updated.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_are_non_empty_and_unique() {
        for pool in [
            BOOT_LOG,
            DOCTRINE,
            COMMS_TIPS,
            MILITARY_FEED,
            MILITARY_CAPTIONS,
            NEWS_FEED,
            NEWS_CAPTIONS,
        ] {
            assert!(!pool.is_empty());
            let mut sorted = pool.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), pool.len());
        }
    }
}
