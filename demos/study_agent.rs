//! Study Agent
//!
//! An interactive agent with two states, 傻瓜 (dumb) and 聪明 (smart).
//!
//! Key concepts:
//! - Studying or practicing (学习, 练习) makes the agent smarter
//! - Watching TV or drinking beer (电视, 啤酒) makes it stupider
//! - Sleeping or resting (睡觉, 休息) clears its head
//! - Too much studying in a row without a break hurts
//!
//! The context stack records +1 per study session, -1 per bout of fun and 0
//! per rest. Guards read its sum and its most recent entries.
//!
//! Run with: cargo run --example study_agent
//! (set RUST_LOG=dialomata=debug to watch transitions fire)

use dialomata::{Automaton, Context, State};
use std::io::{self, BufRead, Write};

const STUDY: [&str; 2] = ["学习", "练习"];
const FUN: [&str; 3] = ["电视", "啤酒", "喝啤酒"];
const REST: [&str; 2] = ["睡觉", "休息"];

type Agent = Automaton<String, i32, String>;

fn is(input: &str, set: &[&str]) -> bool {
    set.contains(&input)
}

fn total(ctx: &Context<i32>) -> i32 {
    ctx.stack().iter().sum()
}

fn needs_a_break(ctx: &Context<i32>) -> bool {
    ctx.stack().ends_with(&[1, 1, 1])
}

fn build() -> dialomata::Result<(Agent, State)> {
    let mut machine = Agent::new();
    let dumb = machine.register_state(State::new("傻瓜"));
    let smart = machine.register_state(State::new("聪明"));

    machine.register_transition(
        &dumb,
        &dumb,
        |input, _| is(input, &FUN),
        |input, ctx| {
            ctx.append(-1);
            format!("{input} makes you stupider, try studying or practicing")
        },
    )?;
    machine.register_transition(
        &dumb,
        &dumb,
        |input, ctx| is(input, &STUDY) && total(ctx) < 3 && !needs_a_break(ctx),
        |input, ctx| {
            ctx.append(1);
            format!("{input} makes you smarter, good!")
        },
    )?;
    machine.register_transition(
        &dumb,
        &dumb,
        |input, _| is(input, &REST),
        |_, ctx| {
            ctx.append(0);
            "Ah, I feel refreshed".to_string()
        },
    )?;
    machine.register_transition(
        &smart,
        &smart,
        |input, _| is(input, &REST),
        |_, ctx| {
            ctx.append(0);
            "Ah, I feel refreshed".to_string()
        },
    )?;
    machine.register_transition(
        &smart,
        &smart,
        |input, ctx| is(input, &STUDY) && needs_a_break(ctx),
        |_, ctx| {
            ctx.append(1);
            "Ouch, my head hurts, I need a break".to_string()
        },
    )?;
    machine.register_transition(
        &smart,
        &smart,
        |input, _| is(input, &STUDY),
        |_, ctx| {
            ctx.append(1);
            "Ah, I feel smarter".to_string()
        },
    )?;
    machine.register_transition(
        &dumb,
        &smart,
        |input, ctx| is(input, &STUDY) && total(ctx) >= 0,
        |_, ctx| {
            ctx.append(1);
            "Good, now I'm smart".to_string()
        },
    )?;
    machine.register_transition(
        &smart,
        &dumb,
        |input, ctx| is(input, &FUN) && total(ctx) <= 0,
        |input, ctx| {
            ctx.append(-1);
            format!("{input} made me stupid, I need to study or practice")
        },
    )?;

    Ok((machine, dumb))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "dialomata=warn".to_string()))
        .with_writer(io::stderr)
        .init();

    let (mut machine, dumb) = build()?;
    machine.set_state(&dumb)?;

    println!(
        "Hello, I am an automaton that can study, practice, drink beer, watch TV, sleep, and rest \
         (学习, 练习, 喝啤酒, 电视, 睡觉, and 休息, respectively)"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("what should I do now\n> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match machine.consume(input.to_string()) {
            Ok(output) => println!("{output}"),
            Err(e) => println!("{e}"),
        }

        let stack: Vec<String> = machine.stack().render();
        let state = machine
            .state()
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("{state} [{}]", stack.join(", "));
    }

    Ok(())
}
