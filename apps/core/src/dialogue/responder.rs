//! Staged response selection.
//!
//! The responder first merges the message facts into the session
//! (first-write-wins), then walks [`RULES`] in order. The first rule that
//! returns a reply decides the turn; later rules are not evaluated. If none
//! fires, the contextual fallback answers.

use tracing::debug;

use super::reply::{LookupRequest, Reply};
use super::templates;
use super::variants::{choose, VariantPicker};
use crate::brain::{Intent, MessageFacts};
use crate::catalog::DroneModel;
use crate::session::{Session, Stage};

/// Everything a rule may read or change during one turn.
pub struct Turn<'a> {
    pub session: &'a mut Session,
    pub facts: &'a MessageFacts,
    pub text: &'a str,
    picker: &'a mut dyn VariantPicker,
}

impl Turn<'_> {
    fn name(&self) -> Option<&str> {
        self.session.user_name.as_deref()
    }
}

type Rule = fn(&mut Turn<'_>) -> Option<Reply>;

/// Ordered rule table. Evaluation stops at the first `Some`.
pub const RULES: &[(&str, Rule)] = &[
    ("first_message", first_message),
    ("name_capture", name_capture),
    ("name_reprompt", name_reprompt),
    ("intent_dispatch", intent_dispatch),
    ("surface_recommendation", surface_recommendation),
    ("missing_surface", missing_surface),
    ("contact_solicitation", contact_solicitation),
];

/// Messages before the bot starts asking for a phone number.
const CONTACT_AFTER_MESSAGES: u32 = 5;

fn first_message(turn: &mut Turn<'_>) -> Option<Reply> {
    if turn.session.message_count != 1 {
        return None;
    }
    turn.session.waiting_for_name = true;
    turn.session.stage = Stage::Greeting;
    Some(Reply::Text(templates::GREETING.to_string()))
}

fn name_capture(turn: &mut Turn<'_>) -> Option<Reply> {
    if !turn.session.waiting_for_name
        || turn.session.user_name.is_some()
        || !turn.facts.looks_like_name
    {
        return None;
    }
    let name = turn.text.trim().to_string();
    turn.session.set_name(name.clone());
    turn.session.waiting_for_name = false;
    turn.session.stage = Stage::Diagnosis;

    let variant = choose(turn.picker, templates::WELCOME_VARIANTS);
    Some(Reply::Text(templates::fill_name(variant, &name)))
}

fn name_reprompt(turn: &mut Turn<'_>) -> Option<Reply> {
    turn.session
        .waiting_for_name
        .then(|| Reply::Text(templates::NAME_REPROMPT.to_string()))
}

fn intent_dispatch(turn: &mut Turn<'_>) -> Option<Reply> {
    let model = turn.session.model_interest;
    let reply = match turn.facts.intent() {
        Intent::Price => match model {
            None => Reply::Text(templates::ask_model_for_price(turn.name())),
            Some(model) => {
                turn.session.stage = Stage::Proposal;
                Reply::Lookup(LookupRequest::Pricing { model })
            }
        },
        Intent::Demo => {
            turn.session.stage = Stage::Capture;
            Reply::Text(templates::demo_checklist(
                turn.name(),
                turn.session.surface_ha,
                turn.session.user_phone.is_some(),
            ))
        }
        Intent::Specs => match model {
            None => Reply::Text(templates::ask_model_for_specs(turn.name())),
            Some(model) => Reply::Lookup(LookupRequest::Specs { model }),
        },
        Intent::Financing => {
            turn.session.stage = Stage::Proposal;
            Reply::Text(templates::financing(turn.name()))
        }
        Intent::Compare => Reply::Text(templates::COMPARISON.to_string()),
        Intent::General => return None,
    };
    Some(reply)
}

/// Fires once per session, on the first turn that reaches it with a known
/// surface. A surface merged while an earlier rule answered is picked up here
/// on a later turn.
fn surface_recommendation(turn: &mut Turn<'_>) -> Option<Reply> {
    if turn.session.recommendation_given() {
        return None;
    }
    let surface_ha = turn.session.surface_ha?;
    turn.session.mark_recommendation_given();
    turn.session.stage = Stage::Proposal;
    let model = DroneModel::recommended_for(surface_ha);
    Some(Reply::Text(templates::recommendation(surface_ha, model)))
}

fn missing_surface(turn: &mut Turn<'_>) -> Option<Reply> {
    (turn.session.stage == Stage::Diagnosis && turn.session.surface_ha.is_none())
        .then(|| Reply::Text(templates::ask_surface(turn.name())))
}

fn contact_solicitation(turn: &mut Turn<'_>) -> Option<Reply> {
    if turn.session.message_count < CONTACT_AFTER_MESSAGES
        || turn.session.user_phone.is_some()
        || turn.facts.intent() == Intent::Demo
    {
        return None;
    }
    let model = turn.session.model_interest?;
    Some(Reply::Text(templates::ask_phone(turn.name(), model)))
}

fn contextual_fallback(turn: &mut Turn<'_>) -> Reply {
    if let Some(model) = turn.session.model_interest {
        let variant = choose(turn.picker, templates::MODEL_FOLLOWUP_VARIANTS);
        return Reply::Text(templates::fill_model(variant, model));
    }
    let topics = turn.facts.topics;
    if topics.problem {
        Reply::Text(templates::PROBLEM_PROMPT.to_string())
    } else if topics.crop {
        Reply::Text(templates::CROP_PROMPT.to_string())
    } else {
        Reply::Text(templates::help_menu(turn.name()))
    }
}

/// Stateful dialogue responder
pub struct Responder {
    picker: Box<dyn VariantPicker>,
}

impl Responder {
    pub fn new(picker: Box<dyn VariantPicker>) -> Self {
        Self { picker }
    }

    /// Merge `facts` into `session` and pick exactly one reply.
    ///
    /// Expects `session.message_count` to already include this message.
    pub fn respond(&mut self, session: &mut Session, facts: &MessageFacts, text: &str) -> Reply {
        session.set_phone(facts.phone.clone());
        session.set_email(facts.email.clone());
        session.set_model(facts.model);
        session.set_surface(facts.surface_ha);

        let mut turn = Turn {
            session,
            facts,
            text,
            picker: self.picker.as_mut(),
        };

        for (name, rule) in RULES {
            if let Some(reply) = rule(&mut turn) {
                debug!(rule = *name, stage = ?turn.session.stage, "Rule fired");
                return reply;
            }
        }
        debug!(rule = "contextual_fallback", stage = ?turn.session.stage, "Rule fired");
        contextual_fallback(&mut turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::MessageAnalyzer;
    use crate::dialogue::variants::FixedPicker;

    fn turn(responder: &mut Responder, session: &mut Session, text: &str) -> Reply {
        session.record_message(text);
        let facts = MessageAnalyzer::new().analyze(text);
        responder.respond(session, &facts, text)
    }

    fn named_session() -> (Responder, Session) {
        let mut responder = Responder::new(Box::new(FixedPicker(0)));
        let mut session = Session::new("test");
        turn(&mut responder, &mut session, "hola");
        turn(&mut responder, &mut session, "Pedro");
        (responder, session)
    }

    #[test]
    fn test_first_message_is_always_the_greeting() {
        let mut responder = Responder::new(Box::new(FixedPicker(0)));
        let mut session = Session::new("s");

        let reply = turn(&mut responder, &mut session, "precio del t50");
        assert_eq!(reply, Reply::Text(templates::GREETING.to_string()));
        assert!(session.waiting_for_name);
        assert_eq!(session.stage, Stage::Greeting);
        // facts are still merged on the first message
        assert_eq!(session.model_interest, Some(DroneModel::T50));
    }

    #[test]
    fn test_name_capture_uses_picked_variant() {
        let mut responder = Responder::new(Box::new(FixedPicker(1)));
        let mut session = Session::new("s");
        turn(&mut responder, &mut session, "hola");

        let reply = turn(&mut responder, &mut session, "  Pedro ");
        assert_eq!(
            reply,
            Reply::Text(templates::fill_name(templates::WELCOME_VARIANTS[1], "Pedro"))
        );
        assert_eq!(session.user_name.as_deref(), Some("Pedro"));
        assert!(!session.waiting_for_name);
        assert_eq!(session.stage, Stage::Diagnosis);
    }

    #[test]
    fn test_reprompt_when_not_a_name() {
        let mut responder = Responder::new(Box::new(FixedPicker(0)));
        let mut session = Session::new("s");
        turn(&mut responder, &mut session, "hola");

        let reply = turn(&mut responder, &mut session, "si");
        assert_eq!(reply, Reply::Text(templates::NAME_REPROMPT.to_string()));
        assert!(session.waiting_for_name);
        assert_eq!(session.stage, Stage::Greeting);
        assert!(session.user_name.is_none());
    }

    #[test]
    fn test_price_without_model_asks_which() {
        let (mut responder, mut session) = named_session();
        let reply = turn(&mut responder, &mut session, "cuánto cuesta?");

        assert_eq!(reply, Reply::Text(templates::ask_model_for_price(Some("Pedro"))));
        assert_eq!(session.stage, Stage::Diagnosis);
    }

    #[test]
    fn test_price_with_model_requests_lookup() {
        let (mut responder, mut session) = named_session();
        let reply = turn(&mut responder, &mut session, "cuánto cuesta el T70?");

        assert_eq!(
            reply,
            Reply::Lookup(LookupRequest::Pricing {
                model: DroneModel::T70P
            })
        );
        assert_eq!(session.stage, Stage::Proposal);
    }

    #[test]
    fn test_specs_with_model_requests_lookup_without_stage_change() {
        let (mut responder, mut session) = named_session();
        let reply = turn(&mut responder, &mut session, "qué autonomía tiene el mavic?");

        assert_eq!(
            reply,
            Reply::Lookup(LookupRequest::Specs {
                model: DroneModel::Mavic3M
            })
        );
        assert_eq!(session.stage, Stage::Diagnosis);
    }

    #[test]
    fn test_demo_moves_to_capture() {
        let (mut responder, mut session) = named_session();
        let reply = turn(&mut responder, &mut session, "quiero una demo, tengo 200 ha");

        assert_eq!(session.stage, Stage::Capture);
        assert_eq!(session.surface_ha, Some(200));
        assert_eq!(
            reply,
            Reply::Text(templates::demo_checklist(Some("Pedro"), Some(200), false))
        );
    }

    #[test]
    fn test_financing_and_compare() {
        let (mut responder, mut session) = named_session();

        let reply = turn(&mut responder, &mut session, "¿hay financiación?");
        assert_eq!(reply, Reply::Text(templates::financing(Some("Pedro"))));
        assert_eq!(session.stage, Stage::Proposal);

        let reply = turn(&mut responder, &mut session, "diferencia entre modelos");
        assert_eq!(reply, Reply::Text(templates::COMPARISON.to_string()));
        assert_eq!(session.stage, Stage::Proposal);
    }

    #[test]
    fn test_surface_recommendation_thresholds() {
        for (text, expected) in [
            ("tengo 120 ha", DroneModel::T25P),
            ("tengo 350 ha", DroneModel::T50),
            ("tengo 2000 ha", DroneModel::T100),
        ] {
            let (mut responder, mut session) = named_session();
            let reply = turn(&mut responder, &mut session, text);
            let hectares = session.surface_ha.unwrap();
            assert_eq!(reply, Reply::Text(templates::recommendation(hectares, expected)));
            assert_eq!(session.stage, Stage::Proposal);
        }
    }

    #[test]
    fn test_recommendation_only_on_first_surface() {
        let (mut responder, mut session) = named_session();
        turn(&mut responder, &mut session, "tengo 350 ha");

        let reply = turn(&mut responder, &mut session, "perdón, son 800 ha");
        assert_eq!(session.surface_ha, Some(350));
        assert_eq!(reply, Reply::Text(templates::help_menu(Some("Pedro"))));
    }

    #[test]
    fn test_surface_from_greeting_is_recommended_after_name() {
        let mut responder = Responder::new(Box::new(FixedPicker(0)));
        let mut session = Session::new("s");
        turn(&mut responder, &mut session, "Hola, tengo 350 ha de soja");
        turn(&mut responder, &mut session, "Pedro");
        assert_eq!(session.surface_ha, Some(350));

        let reply = turn(&mut responder, &mut session, "350 ha");
        assert_eq!(
            reply,
            Reply::Text(templates::recommendation(350, DroneModel::T50))
        );
        assert_eq!(session.stage, Stage::Proposal);
        assert!(session.recommendation_given());
    }

    #[test]
    fn test_surface_from_intent_turn_is_recommended_next() {
        let (mut responder, mut session) = named_session();
        turn(&mut responder, &mut session, "quiero una demo, tengo 200 ha");

        let reply = turn(&mut responder, &mut session, "dale");
        assert_eq!(
            reply,
            Reply::Text(templates::recommendation(200, DroneModel::T25P))
        );

        let reply = turn(&mut responder, &mut session, "gracias");
        assert_eq!(reply, Reply::Text(templates::help_menu(Some("Pedro"))));
    }

    #[test]
    fn test_missing_surface_prompt_in_diagnosis() {
        let (mut responder, mut session) = named_session();
        let reply = turn(&mut responder, &mut session, "ok");

        assert_eq!(reply, Reply::Text(templates::ask_surface(Some("Pedro"))));
        assert_eq!(session.stage, Stage::Diagnosis);
    }

    #[test]
    fn test_contact_solicitation_after_five_messages() {
        let (mut responder, mut session) = named_session();
        turn(&mut responder, &mut session, "tengo 350 ha"); // 3
        turn(&mut responder, &mut session, "me gusta el t50"); // 4: fallback
        let reply = turn(&mut responder, &mut session, "genial"); // 5

        assert_eq!(reply, Reply::Text(templates::ask_phone(Some("Pedro"), DroneModel::T50)));
    }

    #[test]
    fn test_no_contact_request_once_phone_known() {
        let (mut responder, mut session) = named_session();
        turn(&mut responder, &mut session, "tengo 350 ha");
        turn(&mut responder, &mut session, "el t50, mi cel 11 5555 6666");
        let reply = turn(&mut responder, &mut session, "genial");

        assert_eq!(
            reply,
            Reply::Text(templates::fill_model(
                templates::MODEL_FOLLOWUP_VARIANTS[0],
                DroneModel::T50
            ))
        );
    }

    #[test]
    fn test_topic_fallbacks() {
        let (mut responder, mut session) = named_session();
        turn(&mut responder, &mut session, "tengo 350 ha");

        let reply = turn(&mut responder, &mut session, "tengo problemas de malezas en la soja");
        assert_eq!(reply, Reply::Text(templates::PROBLEM_PROMPT.to_string()));

        let reply = turn(&mut responder, &mut session, "hacemos soja y maíz");
        assert_eq!(reply, Reply::Text(templates::CROP_PROMPT.to_string()));
    }

    #[test]
    fn test_rule_table_order() {
        let names: Vec<&str> = RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "first_message",
                "name_capture",
                "name_reprompt",
                "intent_dispatch",
                "surface_recommendation",
                "missing_surface",
                "contact_solicitation",
            ]
        );
    }
}
