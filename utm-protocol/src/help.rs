//! Operator-facing static text

/// Printed once after the status LED finishes blinking
pub const BANNER: &[&str] = &[
    "\n\n\n\n",
    "=====================================================",
    "Welcome to Mirzas Universal Testing Machine Firmware!",
    "=====================================================",
    "",
    "",
];

/// Command listing printed at the end of startup
pub const HELP: &[&str] = &[
    "----------------------",
    "Valid Commands are:",
    "",
    "'GetLoad'                           - Returns the latest load cell reading",
    "'GetVelocity'                       - Returns the angular velocity of each sensor",
    "'GetTotalAngle'                     - Returns the total change of the angle since start",
    "'GetSteps'                          - Returns the total number of steps since start",
    "'GetVersion'                        - Returns the firmware version number",
    "'Enable' / 'Disable'                - Enables/Disables the motors",
    "'Stop'                              - Slows the motors to a stop",
    "'EStop'                             - Breaks the motors to a stop immediately",
    "'SetSpeed' <RPM*10>                 - Sets the rotational speed to rpm times 10",
    "'Up' / 'Down'                       - Moves the motors",
    "'Start'                             - Start rotating the motors at 100 rpm forward",
    "'LoadCellOn' / 'LoadCellOff'        - Continuous reading every 50ms",
    "'SensorsOn' / 'SensorsOff'          - Continuous reading every 50ms",
    "'MoveSteps' <steps>                 - Move a specific number of steps",
    "'SetRampLength' <length>            - Set acceleration ramp length",
    "----------------------",
];
