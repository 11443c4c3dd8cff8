//! Prompt texts, inline keyboards, and the action-code namespace for the
//! stateless funnel buttons.
//!
//! Quiz questions and their option buttons come from the flow tables in
//! `funnel_core::catalog`; everything here is the narrative glue between
//! them (greeting, intake, reveals, results, call-to-action chain).

use funnel_core::flow::{StepDef, StepKind};
use funnel_core::routing::Professional;
use funnel_core::scenario::Scenario;
use funnel_core::scoring::{CostBreakdown, LostPotential};

use crate::transport::{Choice, Prompt};

/// Callback codes for the stateless funnel buttons (quiz option codes live
/// in the flow tables).
pub mod codes {
    pub const LEARN_SCENARIO: &str = "learn_scenario";
    pub const NAME_CONFIRM_OK: &str = "name_confirm_correct";
    pub const NAME_CONFIRM_WRONG: &str = "name_confirm_incorrect";
    pub const PHONE_CONFIRM_OK: &str = "phone_confirm_correct";
    pub const PHONE_CONFIRM_WRONG: &str = "phone_confirm_incorrect";
    pub const GOAL_CAREER: &str = "goal_career";
    pub const GOAL_SKILLS: &str = "goal_skills";
    pub const GOAL_PERSONAL: &str = "goal_personal";
    pub const DISCOVER_SCENARIO: &str = "discover_scenario";
    pub const START_QUIZ: &str = "start_quiz";
    pub const SHOW_QUIZ_RESULTS: &str = "show_quiz_results";
    pub const LEARN_SCENARIO_COST: &str = "learn_scenario_cost";
    pub const CALC_SCENARIO_COST: &str = "calc_scenario_cost";
    pub const CALC_LOST_POTENTIAL: &str = "calc_lost_potential";
    pub const NO_MORE_SCENARIO: &str = "no_more_scenario";
    pub const GET_VIDEO: &str = "get_video";
    pub const LEARN_MORE_PROGRAM: &str = "learn_more_program";
    pub const BOOK_CALL: &str = "book_call";
    pub const GO_TO_CHANNEL: &str = "go_to_channel";
}

/// File name of the goal checklist the transport delivers at the end of the
/// call-to-action chain.
pub const CHECKLIST_FILE_NAME: &str = "goal_checklist.pdf";

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Group digits in threes with a space separator (`2400000` -> `2 400 000`).
pub fn format_amount(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (ix, ch) in digits.chars().enumerate() {
        if ix > 0 && (ix + 3 - offset) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// ---------------------------------------------------------------------------
// Greeting and intake
// ---------------------------------------------------------------------------

pub fn greeting() -> Prompt {
    Prompt::with_choices(
        "Did you know that 93% of people who feel drawn to psychology never \
         fully realize that potential?\n\n\
         The reason is one of three toxic inner scenarios that quietly block \
         growth. They sound like common sense -- \"I still have so much to \
         learn\", \"it's not the right time yet\" -- but they postpone your \
         realization again and again.\n\n\
         Want to find out which scenario is holding you back right now?",
        vec![Choice::new(codes::LEARN_SCENARIO, "Find out my scenario")],
    )
}

pub fn ask_name() -> Prompt {
    Prompt::text("What is your name?")
}

pub fn confirm_name(name: &str) -> Prompt {
    Prompt::with_choices(
        format!("Your name is {name}. Correct?"),
        vec![
            Choice::new(codes::NAME_CONFIRM_OK, "Correct"),
            Choice::new(codes::NAME_CONFIRM_WRONG, "Not correct"),
        ],
    )
}

pub fn name_saved(name: &str) -> Prompt {
    Prompt::text(format!("Great, {name}! Your name is saved."))
}

pub fn ask_name_again() -> Prompt {
    Prompt::text("Please enter your name again.")
}

pub fn ask_phone() -> Prompt {
    Prompt::text("Please send your phone number.")
}

pub fn confirm_phone(phone: &str) -> Prompt {
    Prompt::with_choices(
        format!("Your number is {phone}. Correct?"),
        vec![
            Choice::new(codes::PHONE_CONFIRM_OK, "Correct"),
            Choice::new(codes::PHONE_CONFIRM_WRONG, "Not correct"),
        ],
    )
}

pub fn phone_saved() -> Prompt {
    Prompt::text("Thank you! Your phone number is saved.")
}

pub fn ask_phone_again() -> Prompt {
    Prompt::text("Please enter your phone number again.")
}

pub fn goal_prompt() -> Prompt {
    Prompt::with_choices(
        "What matters most to you right now?",
        vec![
            Choice::new(codes::GOAL_CAREER, "Start a practice and earn my first income"),
            Choice::new(codes::GOAL_SKILLS, "Improve my skills and grow my client base"),
            Choice::new(codes::GOAL_PERSONAL, "Study psychology for myself and my own growth"),
        ],
    )
}

pub fn goal_saved(display_name: &str) -> Prompt {
    Prompt::with_choices(
        format!(
            "Great, {display_name}!\n\n\
             You've taken the first step toward your realization. Everyone on \
             this path has an unconscious \"stop\" -- for one person it's \
             \"everything must be perfect before I start\", for another the \
             fear of being under-qualified, for a third not allowing \
             themselves to charge for their knowledge.\n\n\
             These are all scenarios. They run in the background and block \
             growth -- and they can be reversed. Let's find out what is \
             holding you back personally."
        ),
        vec![Choice::new(codes::DISCOVER_SCENARIO, "Discover my scenario")],
    )
}

pub fn pre_quiz() -> Prompt {
    Prompt::with_choices(
        "Time to look deeper.\n\n\
         Neither education, nor experience, nor charisma plays the key role \
         while a limiting scenario is running inside. It may sound like a \
         reasonable fear or like \"not yet\" -- but it does one thing: it \
         stops you.\n\n\
         Want to find out exactly what is holding you back?",
        vec![Choice::new(codes::START_QUIZ, "Start the quiz")],
    )
}

// ---------------------------------------------------------------------------
// Persona quiz
// ---------------------------------------------------------------------------

/// Render a quiz step as a prompt with its option buttons (and the done
/// button for multi-select steps).
pub fn quiz_question(step: &StepDef) -> Prompt {
    let mut choices: Vec<Choice> = step
        .options
        .iter()
        .map(|o| Choice::new(o.code, o.label))
        .collect();
    if let StepKind::MultiSelect { done_code, done_label } = step.kind {
        choices.push(Choice::new(done_code, done_label));
    }
    Prompt::with_choices(step.prompt, choices)
}

pub fn quiz_complete() -> Prompt {
    Prompt::with_choices(
        "Quiz complete!",
        vec![Choice::new(codes::SHOW_QUIZ_RESULTS, "See my scenario results")],
    )
}

pub fn scenario_reveal(scenario: Scenario) -> Prompt {
    let body = match scenario {
        Scenario::Impostor => {
            "Your scenario is \"Impostor syndrome\".\n\n\
             You often feel your knowledge or experience is not enough. That \
             makes it hard to raise your price or even to start practicing.\n\n\
             Stay to the end and we'll show how to stop waiting for \"one \
             more diploma\" and start working with what you already have."
        }
        Scenario::EternalStudent => {
            "Your scenario is \"Eternal student\".\n\n\
             You want everything done properly -- no mistakes, no chaos. That \
             very wish is the brake: you postpone action until the plan is \
             perfect.\n\n\
             Stay to the end and we'll show how to leave the \"it must be \
             perfect\" paralysis and start moving right now."
        }
        Scenario::Seeker => {
            "Your scenario is \"Restless seeker\".\n\n\
             You keep searching, analyzing, trying directions. The more you \
             think, the harder the choice becomes, and doubt drains energy \
             and confidence.\n\n\
             Stay to the end and we'll show how to end the endless search \
             for the \"right path\" and finally choose."
        }
    };
    Prompt::with_choices(
        format!(
            "We've calculated your dominant scenario. Note: it is not a \
             label, it is a point of awareness.\n\n{body}\n\n\
             Next you'll see how exactly this scenario affects your life -- \
             and why you are losing more than it seems."
        ),
        vec![Choice::new(codes::LEARN_SCENARIO_COST, "Show me what my scenario costs")],
    )
}

// ---------------------------------------------------------------------------
// Cost branch (professionals)
// ---------------------------------------------------------------------------

pub fn cost_intro(scenario: Scenario) -> Prompt {
    Prompt::with_choices(
        format!(
            "The \"{}\" scenario is not just a feeling -- it has a price. \
             Every month of postponing has a cost in money you did not earn. \
             Three quick questions and we'll calculate yours.",
            scenario.display_name()
        ),
        vec![Choice::new(codes::CALC_SCENARIO_COST, "Calculate my cost")],
    )
}

pub fn cost_result(
    scenario: Option<Scenario>,
    months_delay: i64,
    cost: &CostBreakdown,
) -> Prompt {
    let scenario_name = scenario.as_ref().map(Scenario::display_name).unwrap_or("your scenario");
    Prompt::with_choices(
        format!(
            "Here is the cost of inaction.\n\n\
             That's minus {} every month.\n\n\
             Over {} months the \"{}\" scenario has already cost you about {}.\n\n\
             If nothing changes, in 3 years it adds up to {}.",
            format_amount(cost.lost_per_month),
            months_delay,
            scenario_name,
            format_amount(cost.lost_total),
            format_amount(cost.lost_three_years),
        ),
        vec![Choice::new(codes::NO_MORE_SCENARIO, "I don't want to lose any more")],
    )
}

// ---------------------------------------------------------------------------
// Lost-potential branch (non-professionals)
// ---------------------------------------------------------------------------

pub fn lost_potential_intro() -> Prompt {
    Prompt::with_choices(
        "Even before a practice starts, a scenario has a cost -- in time and \
         in unrealized potential. Three quick questions and we'll count \
         yours.",
        vec![Choice::new(codes::CALC_LOST_POTENTIAL, "Count my lost potential")],
    )
}

pub fn lost_potential_result(result: &LostPotential) -> Prompt {
    Prompt::with_choices(
        format!(
            "Here is what the waiting adds up to.\n\n\
             You've been drawn to psychology for about {} days.\n\
             The thought \"I want to start, but I keep putting it off\" came \
             back around {} times.\n\
             And you've accumulated {} forms of self-sabotage that keep you \
             in place.",
            format_amount(result.days),
            format_amount(result.thoughts),
            result.sabotage_forms,
        ),
        vec![Choice::new(codes::NO_MORE_SCENARIO, "I don't want to lose any more")],
    )
}

// ---------------------------------------------------------------------------
// Recovery branches
// ---------------------------------------------------------------------------

pub fn needs_intake() -> Prompt {
    Prompt::with_choices(
        "Let's get acquainted first.",
        vec![Choice::new(codes::LEARN_SCENARIO, "Find out my scenario")],
    )
}

pub fn needs_persona_quiz() -> Prompt {
    Prompt::with_choices(
        "First, let's find your dominant scenario.",
        vec![Choice::new(codes::START_QUIZ, "Start the quiz")],
    )
}

pub fn restart_hint() -> Prompt {
    Prompt::text("Sorry, I lost track of where we were. Please start over from the menu.")
}

pub fn profile_missing() -> Prompt {
    Prompt::text("Something went wrong: your profile was not found. Please send /start.")
}

pub fn run_missing() -> Prompt {
    Prompt::text("Something went wrong: your quiz result was not found. Please start the quiz again.")
}

// ---------------------------------------------------------------------------
// Call-to-action chain
// ---------------------------------------------------------------------------

pub fn video_offer(scenario: Option<Scenario>) -> Prompt {
    let scenario_name = scenario.as_ref().map(Scenario::display_name).unwrap_or("your scenario");
    Prompt::with_choices(
        format!(
            "Tonight -- an important video for you.\n\n\
             You'll learn why the \"{scenario_name}\" scenario slows your \
             growth so much, where exactly you lose energy and confidence, \
             and what to do right now to get moving."
        ),
        vec![Choice::new(codes::GET_VIDEO, "I want the video")],
    )
}

pub fn video_delivered() -> Prompt {
    Prompt::with_choices(
        "Here is your video. Watch it today while the insight is fresh -- \
         it shows the first step out of your scenario.",
        vec![Choice::new(codes::LEARN_MORE_PROGRAM, "Tell me more about the program")],
    )
}

/// The program pitch branches on the professional flag: practitioners get
/// the practice-and-income framing, everyone else the personal-change one.
pub fn program_pitch(professional: Professional) -> Prompt {
    match professional {
        Professional::Professional => Prompt::with_choices(
            "Want to trade the endless doubts for confidence and a stable \
             income? Let's check whether the program fits you.\n\n\
             On a short diagnostic call we'll map out together:\n\
             - where you are right now as a practitioner,\n\
             - a realistic point B you can reach during the program,\n\
             - whether our approach suits you or another path fits better.",
            vec![Choice::new(codes::BOOK_CALL, "Book a call")],
        ),
        Professional::NonProfessional | Professional::Unknown => Prompt::with_choices(
            "Want to move from getting by to a life that actually feels \
             yours? Let's check whether the program can help.\n\n\
             On a short diagnostic call we'll look together at:\n\
             - what exactly keeps you in the current situation,\n\
             - which deeper beliefs block your results,\n\
             - whether the program fits you or another path fits better.",
            vec![Choice::new(codes::BOOK_CALL, "Book a call")],
        ),
    }
}

pub fn booking_info() -> Prompt {
    Prompt::with_choices(
        "Great! Pick a slot that suits you and we'll meet: \
         https://calendly.com/realization-call\n\n\
         Meanwhile, our channel has daily materials on reversing scenarios.",
        vec![Choice::new(codes::GO_TO_CHANNEL, "Go to the channel")],
    )
}

pub fn channel_info() -> Prompt {
    Prompt::text(
        "You can find the channel here: https://t.me/realization_channel\n\n\
         And as promised -- the step-by-step goal checklist is attached.",
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
