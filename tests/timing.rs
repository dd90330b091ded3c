mod common;

use common::{boot, FlatMemory};
use nesdb::Memory;

/// Cycles taken by each instruction of `program`, loaded at `origin`.
fn cycles_at(origin: u16, program: &[u8], setup: impl Fn(&mut FlatMemory)) -> Vec<u32> {
    let mut mem = FlatMemory::with_program(origin, program);
    setup(&mut mem);
    let mut cpu = boot(&mem);
    let mut cycles = Vec::new();
    while cpu.pc() < origin + program.len() as u16 && cpu.pc() >= origin {
        cycles.push(cpu.step(&mut mem));
    }
    cycles
}

fn cycles(program: &[u8]) -> Vec<u32> {
    cycles_at(0x8000, program, |_| {})
}

#[test]
fn state_changes_on_the_first_cycle() {
    let mut mem = FlatMemory::with_program(0x8000, &[0xA9, 0x42, 0xEA]);
    let mut cpu = boot(&mem);
    assert_eq!(cpu.remaining_cycles(), 0);

    cpu.clock(&mut mem);
    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.remaining_cycles(), 1);
    assert_eq!(cpu.total_cycles(), 1);

    cpu.clock(&mut mem);
    assert_eq!(cpu.remaining_cycles(), 0);
    assert_eq!(cpu.pc(), 0x8002);

    cpu.clock(&mut mem);
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.total_cycles(), 3);
}

#[test]
fn step_returns_the_instruction_length_in_cycles() {
    // LDA #$01; STA $0200; INC $0200,X; JMP $8000
    let mut mem = FlatMemory::with_program(
        0x8000,
        &[0xA9, 0x01, 0x8D, 0x00, 0x02, 0xFE, 0x00, 0x02, 0x4C, 0x00, 0x80],
    );
    let mut cpu = boot(&mem);
    assert_eq!(cpu.step(&mut mem), 2);
    assert_eq!(cpu.step(&mut mem), 4);
    assert_eq!(cpu.step(&mut mem), 7);
    assert_eq!(cpu.step(&mut mem), 3);
    assert_eq!(cpu.total_cycles(), 16);
    assert_eq!(mem.read(0x0200), 0x02);
}

#[test]
fn step_finishes_a_partly_clocked_instruction() {
    // LDA $0200
    let mut mem = FlatMemory::with_program(0x8000, &[0xAD, 0x00, 0x02]);
    let mut cpu = boot(&mem);
    cpu.clock(&mut mem);
    assert_eq!(cpu.step(&mut mem), 3);
    assert_eq!(cpu.total_cycles(), 4);
}

#[test]
fn indexed_reads_pay_for_page_crossing() {
    // LDX #$01; LDA $1200,X; LDA $12FF,X
    assert_eq!(
        cycles(&[0xA2, 0x01, 0xBD, 0x00, 0x12, 0xBD, 0xFF, 0x12]),
        vec![2, 4, 5]
    );
    // LDY #$01; LDA $1200,Y; LDA $12FF,Y
    assert_eq!(
        cycles(&[0xA0, 0x01, 0xB9, 0x00, 0x12, 0xB9, 0xFF, 0x12]),
        vec![2, 4, 5]
    );
}

#[test]
fn indexed_writes_never_pay_for_page_crossing() {
    // LDX #$01; STA $1200,X; STA $12FF,X; ASL $12FF,X
    assert_eq!(
        cycles(&[0xA2, 0x01, 0x9D, 0x00, 0x12, 0x9D, 0xFF, 0x12, 0x1E, 0xFF, 0x12]),
        vec![2, 5, 5, 7]
    );
}

#[test]
fn indirect_indexed_read_crossing_a_page() {
    // LDY #$01; LDA ($20),Y twice, first without and then with a crossing
    let program = [0xA0, 0x01, 0xB1, 0x20, 0xB1, 0x22];
    let timings = cycles_at(0x8000, &program, |mem| {
        mem.set_word(0x0020, 0x0300);
        mem.set_word(0x0022, 0x03FF);
    });
    assert_eq!(timings, vec![2, 5, 6]);
}

#[test]
fn indexed_indirect_has_no_crossing_penalty() {
    // LDX #$FF; LDA ($20,X)
    let timings = cycles_at(0x8000, &[0xA2, 0xFF, 0xA1, 0x20], |mem| {
        mem.set_word(0x001F, 0x03FF);
    });
    assert_eq!(timings, vec![2, 6]);
}

#[test]
fn branch_not_taken() {
    // LDA #$01; BEQ +2
    assert_eq!(cycles(&[0xA9, 0x01, 0xF0, 0x02]), vec![2, 2]);
}

#[test]
fn branch_taken_on_the_same_page() {
    // LDA #$00; BEQ +0
    assert_eq!(cycles(&[0xA9, 0x00, 0xF0, 0x00, 0xEA]), vec![2, 3, 2]);
}

#[test]
fn branch_taken_across_a_page() {
    // LDA #$00 at $80EE; BEQ +$20 at $80F0 lands on $8112
    let mut mem = FlatMemory::with_program(0x80EE, &[0xA9, 0x00, 0xF0, 0x20]);
    let mut cpu = boot(&mem);
    assert_eq!(cpu.step(&mut mem), 2);
    assert_eq!(cpu.step(&mut mem), 4);
    assert_eq!(cpu.pc(), 0x8112);
}

#[test]
fn backward_branch_across_a_page() {
    // LDA #$00 at $8100; BEQ -$10 lands on $80F4
    let mut mem = FlatMemory::with_program(0x8100, &[0xA9, 0x00, 0xF0, 0xF0]);
    let mut cpu = boot(&mem);
    cpu.step(&mut mem);
    assert_eq!(cpu.step(&mut mem), 4);
    assert_eq!(cpu.pc(), 0x80F4);
}

#[test]
fn control_flow_timings() {
    // JSR $8004; NOP; RTS
    let mut mem = FlatMemory::with_program(0x8000, &[0x20, 0x04, 0x80, 0xEA, 0x60]);
    let mut cpu = boot(&mem);
    assert_eq!(cpu.step(&mut mem), 6);
    assert_eq!(cpu.step(&mut mem), 6);
    assert_eq!(cpu.pc(), 0x8003);

    // JMP ($0200)
    let mut mem = FlatMemory::with_program(0x8000, &[0x6C, 0x00, 0x02]);
    mem.set_word(0x0200, 0x9000);
    let mut cpu = boot(&mem);
    assert_eq!(cpu.step(&mut mem), 5);
}

#[test]
fn interrupts_add_their_cycles() {
    let mut mem = FlatMemory::with_program(0x8000, &[0x58, 0xEA]);
    mem.set_word(0xFFFE, 0x9000);
    mem.set_word(0xFFFA, 0xA000);
    let mut cpu = boot(&mem);
    cpu.step(&mut mem);

    cpu.irq(&mut mem);
    assert_eq!(cpu.remaining_cycles(), 7);
    assert_eq!(cpu.step(&mut mem), 7);

    cpu.nmi(&mut mem);
    assert_eq!(cpu.remaining_cycles(), 8);
    assert_eq!(cpu.step(&mut mem), 8);
}

#[test]
#[should_panic(expected = "unimplemented opcode $02")]
fn undocumented_opcode_panics() {
    let mut mem = FlatMemory::with_program(0x8000, &[0x02]);
    let mut cpu = boot(&mem);
    cpu.clock(&mut mem);
}
