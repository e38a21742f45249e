//! The built-in standard catalog.
//!
//! Produces the same [`Catalog`] a JSON catalog file would, without needing
//! one on disk. `ft catalog --json` dumps it as a starting point for custom
//! tables.

use ft_core::{
    Attribute, AttributeRequirement, Catalog, ClanDefinition, ClassDefinition, EffectKind,
    EffectValue, OriginDefinition, PassiveEffect, PoolFormula, PowerDefinition, PowerKind,
    RequirementGroup, ResourceFormulas, SkillChoiceGroup, SkillRequirement, TechniqueBonus,
    TechniqueCategory, TrackDefinition, TrainingGrade,
};

/// Skill taught to every school student.
pub const SCHOOL_SKILL: &str = "Feitiçaria";

const SKILLS: [&str; 22] = [
    "Acrobacia",
    "Atletismo",
    "Atualidades",
    "Diplomacia",
    "Enganação",
    "Feitiçaria",
    "Fortitude",
    "Furtividade",
    "Intimidação",
    "Intuição",
    "Investigação",
    "Luta",
    "Medicina",
    "Ocultismo",
    "Percepção",
    "Pontaria",
    "Prestidigitação",
    "Reflexos",
    "Sobrevivência",
    "Tática",
    "Tecnologia",
    "Vontade",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The standard rules: three classes, five origins, five tracks, four clans,
/// and the core power list.
pub fn standard() -> Catalog {
    let mut catalog = Catalog::empty("feitico_padrao", SCHOOL_SKILL);
    catalog.skills = strings(&SKILLS);
    catalog.classes = classes();
    catalog.origins = origins();
    catalog.tracks = tracks();
    catalog.clans = clans();
    catalog.powers = powers();
    catalog
}

fn classes() -> Vec<ClassDefinition> {
    vec![
        ClassDefinition {
            id: "combatente".to_string(),
            name: "Combatente".to_string(),
            free_skill_slots: 1,
            fixed_skills: strings(&["Luta", "Fortitude"]),
            skill_choices: vec![
                SkillChoiceGroup::new(1, ["Tática", "Atletismo"]),
                SkillChoiceGroup::new(2, ["Pontaria", "Reflexos", "Intimidação", "Percepção"]),
            ],
            proficiencies: strings(&[
                "armas simples",
                "armas táticas",
                "proteções leves",
                "proteções pesadas",
            ]),
            resources: ResourceFormulas {
                pv: PoolFormula::with_attribute(20, 4, Attribute::Vigor),
                pe: PoolFormula::with_attribute(2, 2, Attribute::Presence),
                ea: PoolFormula::flat(1, 1),
                san: PoolFormula::flat(12, 3),
            },
        },
        ClassDefinition {
            id: "especialista".to_string(),
            name: "Especialista".to_string(),
            free_skill_slots: 3,
            fixed_skills: strings(&["Percepção", "Investigação"]),
            skill_choices: vec![SkillChoiceGroup::new(
                2,
                ["Furtividade", "Tecnologia", "Medicina", "Diplomacia", "Enganação", "Tática"],
            )],
            proficiencies: strings(&["armas simples", "proteções leves"]),
            resources: ResourceFormulas {
                pv: PoolFormula::with_attribute(16, 3, Attribute::Vigor),
                pe: PoolFormula::with_attribute(3, 3, Attribute::Presence),
                ea: PoolFormula::flat(2, 2),
                san: PoolFormula::flat(16, 4),
            },
        },
        ClassDefinition {
            id: "feiticeiro".to_string(),
            name: "Feiticeiro".to_string(),
            free_skill_slots: 1,
            fixed_skills: strings(&["Feitiçaria", "Vontade", "Ocultismo"]),
            skill_choices: vec![SkillChoiceGroup::new(
                1,
                ["Intuição", "Prestidigitação", "Percepção"],
            )],
            proficiencies: strings(&["armas simples"]),
            resources: ResourceFormulas {
                pv: PoolFormula::with_attribute(12, 2, Attribute::Vigor),
                pe: PoolFormula::with_attribute(2, 2, Attribute::Presence),
                ea: PoolFormula::flat(4, 4),
                san: PoolFormula::flat(20, 5),
            },
        },
    ]
}

fn origin(
    id: &str,
    name: &str,
    fixed: &[&str],
    choice: Option<SkillChoiceGroup>,
    requirements: &[&str],
) -> OriginDefinition {
    OriginDefinition {
        id: id.to_string(),
        name: name.to_string(),
        fixed_skills: strings(fixed),
        skill_choice: choice,
        requirements: strings(requirements),
    }
}

fn origins() -> Vec<OriginDefinition> {
    vec![
        origin(
            "academico",
            "Acadêmico",
            &["Atualidades"],
            Some(SkillChoiceGroup::new(1, ["Investigação", "Medicina", "Tecnologia"])),
            &["Ter estudado em uma instituição de ensino superior"],
        ),
        origin("militar", "Militar", &["Tática", "Pontaria"], None, &[]),
        origin("lutador", "Lutador", &["Luta", "Atletismo"], None, &[]),
        origin(
            "herdeiro",
            "Herdeiro de Clã",
            &["Feitiçaria"],
            Some(SkillChoiceGroup::new(1, ["Diplomacia", "Ocultismo"])),
            &["Pertencer a um clã de feiticeiros"],
        ),
        origin(
            "estrategista",
            "Estrategista",
            &["Intuição"],
            Some(SkillChoiceGroup::new(1, ["Tática", "Diplomacia"])),
            &[],
        ),
    ]
}

fn track(id: &str, name: &str, class: &str, skill: &str) -> TrackDefinition {
    TrackDefinition {
        id: id.to_string(),
        name: name.to_string(),
        class: class.to_string(),
        required_skill: Some(skill.to_string()),
        sub_paths: Vec::new(),
        technique_bonuses: Vec::new(),
    }
}

fn tracks() -> Vec<TrackDefinition> {
    let mut barrier_master = track(
        "mestre_de_barreiras",
        "Mestre de Barreiras",
        "feiticeiro",
        "Feitiçaria",
    );
    barrier_master.sub_paths = strings(&["anti_barreira", "dominio"]);
    barrier_master.technique_bonuses = vec![
        TechniqueBonus::at_level(TechniqueCategory::Barrier, 5),
        TechniqueBonus::at_level(TechniqueCategory::AntiBarrier, 15).for_sub_path("anti_barreira"),
        TechniqueBonus::at_level(TechniqueCategory::Barrier, 15).for_sub_path("dominio"),
    ];

    let mut summoner = track("conjurador", "Conjurador", "feiticeiro", "Ocultismo");
    summoner.technique_bonuses = vec![TechniqueBonus::at_level(TechniqueCategory::Shikigami, 5)];

    vec![
        track("aniquilador", "Aniquilador", "combatente", "Luta"),
        track("comandante", "Comandante de Campo", "combatente", "Tática"),
        track("medico_de_campo", "Médico de Campo", "especialista", "Medicina"),
        barrier_master,
        summoner,
    ]
}

fn clans() -> Vec<ClanDefinition> {
    vec![
        ClanDefinition {
            id: "gojo".to_string(),
            name: "Gojo".to_string(),
            privileged: true,
            technique_bonuses: vec![TechniqueBonus::at_level(TechniqueCategory::Base, 10)],
        },
        ClanDefinition {
            id: "zenin".to_string(),
            name: "Zen'in".to_string(),
            privileged: true,
            technique_bonuses: vec![TechniqueBonus::at_level(TechniqueCategory::Shikigami, 10)],
        },
        ClanDefinition {
            id: "kamo".to_string(),
            name: "Kamo".to_string(),
            privileged: true,
            technique_bonuses: vec![TechniqueBonus::at_level(TechniqueCategory::Base, 5)],
        },
        ClanDefinition {
            id: "inumaki".to_string(),
            name: "Inumaki".to_string(),
            privileged: false,
            technique_bonuses: Vec::new(),
        },
    ]
}

fn attr(attribute: Attribute, minimum: u8) -> AttributeRequirement {
    AttributeRequirement::new(attribute, minimum)
}

fn powers() -> Vec<PowerDefinition> {
    use Attribute::{Agility, Intellect, Presence, Strength, Vigor};

    vec![
        PowerDefinition::new(
            "reflexos_defensivos",
            "Reflexos Defensivos",
            PowerKind::Passive,
            "defesa",
        )
        .described("Seu corpo reage antes da mente: +2 em Defesa.")
        .attributes(RequirementGroup::all(vec![attr(Agility, 2)]))
        .effect(PassiveEffect::new(EffectKind::Defense, EffectValue::Flat(2))),
        PowerDefinition::new("golpe_pesado", "Golpe Pesado", PowerKind::Manual, "combate")
            .described("Gaste 2 PE para somar um dado extra de dano corpo a corpo.")
            .attributes(RequirementGroup::all(vec![attr(Strength, 2)]))
            .skills(RequirementGroup::all(vec![SkillRequirement::trained("Luta")])),
        PowerDefinition::new("ataque_brutal", "Ataque Brutal", PowerKind::Manual, "combate")
            .described("Quando acerta um Golpe Pesado, o alvo fica desprevenido.")
            .min_level(3)
            .attributes(RequirementGroup::all(vec![attr(Strength, 3)]))
            .requires("golpe_pesado"),
        PowerDefinition::new("executor", "Executor", PowerKind::Manual, "combate")
            .described("Contra alvos abaixo da metade dos PV, seus críticos causam dano dobrado.")
            .min_level(6)
            .requires("ataque_brutal"),
        PowerDefinition::new("pele_de_aco", "Pele de Aço", PowerKind::Passive, "defesa")
            .described("Redução de dano que cresce a cada cinco níveis.")
            .attributes(RequirementGroup::any(vec![attr(Vigor, 2), attr(Strength, 3)]))
            .effect(PassiveEffect::new(
                EffectKind::DamageReduction,
                EffectValue::PerLevel {
                    base: 1,
                    every: 5,
                    step: 1,
                },
            )),
        PowerDefinition::new("vitalidade", "Vitalidade", PowerKind::Passive, "defesa")
            .described("+1 PV por nível de personagem.")
            .attributes(RequirementGroup::all(vec![attr(Vigor, 2)]))
            .effect(PassiveEffect::new(
                EffectKind::Pv,
                EffectValue::PerLevel {
                    base: 0,
                    every: 1,
                    step: 1,
                },
            )),
        PowerDefinition::new("corrida", "Corrida", PowerKind::Passive, "movimento")
            .described("+3 m de deslocamento sem proteção pesada.")
            .attributes(RequirementGroup::all(vec![attr(Agility, 3)]))
            .effect(
                PassiveEffect::new(EffectKind::Speed, EffectValue::Flat(3))
                    .when("sem proteção pesada"),
            ),
        PowerDefinition::new(
            "fluxo_de_energia",
            "Fluxo de Energia",
            PowerKind::Passive,
            "energia",
        )
        .described("Sua reserva de energia amaldiçoada cresce com a experiência.")
        .skills(RequirementGroup::any(vec![
            SkillRequirement::trained("Feitiçaria"),
            SkillRequirement::trained("Ocultismo"),
        ]))
        .effect(PassiveEffect::new(
            EffectKind::Ea,
            EffectValue::PerLevel {
                base: 2,
                every: 4,
                step: 1,
            },
        )),
        PowerDefinition::new("barreira_simples", "Barreira Simples", PowerKind::Manual, "energia")
            .described("Gaste 3 EA para erguer uma barreira que bloqueia a visão de civis.")
            .skills(RequirementGroup::all(vec![SkillRequirement::trained("Feitiçaria")]))
            .requires("fluxo_de_energia"),
        PowerDefinition::new("mente_blindada", "Mente Blindada", PowerKind::Passive, "mente")
            .described("+5 SAN e +2 em testes de Vontade.")
            .attributes(RequirementGroup::all(vec![attr(Presence, 2)]))
            .skills(RequirementGroup::all(vec![SkillRequirement::trained("Vontade")]))
            .effect(PassiveEffect::new(EffectKind::San, EffectValue::Flat(5)))
            .effect(PassiveEffect::skill_bonus("Vontade", EffectValue::Flat(2))),
        PowerDefinition::new("olhar_atento", "Olhar Atento", PowerKind::Passive, "mente")
            .described("+2 em Percepção.")
            .skills(RequirementGroup::all(vec![SkillRequirement::at_grade(
                "Percepção",
                TrainingGrade::Graduated,
            )]))
            .effect(PassiveEffect::skill_bonus("Percepção", EffectValue::Flat(2))),
        PowerDefinition::new("comando_tatico", "Comando Tático", PowerKind::Manual, "tatica")
            .described(
                "Uma vez por cena, aliados em alcance médio recebem uma ação de movimento.",
            )
            .min_level(9)
            .attributes(RequirementGroup::all(vec![attr(Intellect, 3), attr(Presence, 3)]))
            .skills(RequirementGroup::all(vec![SkillRequirement::at_grade(
                "Tática",
                TrainingGrade::Veteran,
            )])),
    ]
}
